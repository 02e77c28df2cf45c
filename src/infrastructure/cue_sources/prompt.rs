use crate::domain::{ReadingSpeed, word_count};

const CUE_FIELDS: &str = r#"For each sound provide:
- "description": a detailed description of the sound for a text-to-audio model
- "channel": "SFX" for short punctual effects, "AMBIENCE" for background texture, "MUSIC" for emotional score
- "word_index": 0-based position of the word that triggers the sound
- "start_time_ms": round(word_index / {speed} * 1000)
- "duration_ms": your exact decision. SFX 500-3000 depending on the sound, AMBIENCE until the scene changes or the story ends, MUSIC 2000-10000 following the emotional beat
- "gain_db": volume adjustment between -15.0 and 6.0, use 6.0 for loud sounds

Timing rules:
1. Every cue must have a duration_ms.
2. When a new AMBIENCE or MUSIC cue starts, the previous cue of the same channel ends at that start time.
3. start_time_ms + duration_ms must not exceed {total} ms.
4. Keep the cue count small, three or four cues at most."#;

const NARRATION_FIELDS: &str = r#"Also direct a narrator who reads the whole story from word 0 to the end.
Split the story into one or more NARRATOR cues with:
- "channel": "NARRATOR"
- "text_segment": the exact part of the story to read
- "voice_style_description": pitch, pace and emotion for the reading, e.g. "A calm speaker with a low voice at a moderate pace, close and clear recording"
- "start_time_ms" and "duration_ms" covering that part at the reading speed"#;

/// Prompt asking a model for a JSON cue list with explicit timing math.
pub fn build_cue_prompt(story_text: &str, speed: ReadingSpeed, with_narration: bool) -> String {
    let words = word_count(story_text);
    let total = speed.duration_ms(words);
    let wps = speed.words_per_second();

    let fields = CUE_FIELDS
        .replace("{speed}", &wps.to_string())
        .replace("{total}", &total.to_string());

    let mut prompt = format!(
        "You are a sound designer. Analyze the story below and extract cinematic audio cues timed to the reading speed.\n\n\
         Story: \"{story_text}\"\n\n\
         Reading speed: {wps} words per second\n\
         Word count: {words}\n\
         Total duration: {total} ms\n\n\
         {fields}\n"
    );

    if with_narration {
        prompt.push('\n');
        prompt.push_str(NARRATION_FIELDS);
        prompt.push_str(
            "\n\nReturn ONLY a JSON object of the form {\"audio_cues\": [ ... ]} holding narrator and sound cues.\n",
        );
    } else {
        prompt.push_str(
            "\nReturn ONLY a JSON array:\n\
             [{\"description\": \"...\", \"channel\": \"SFX|AMBIENCE|MUSIC\", \"word_index\": 0, \"start_time_ms\": 0, \"duration_ms\": 2000, \"gain_db\": 0.0}]\n",
        );
    }

    prompt
}
