//! Parse an .srt file and print its cues, styles and any dropped blocks.
//! Run: cargo run -p debug --bin subtitle_dump -- path/to/track.srt [time_ms]

use subtitles::{format_mm_ss, SubtitleTrack};

fn main() -> Result<(), String> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: subtitle_dump <track.srt> [time_ms]")?;
    let track = SubtitleTrack::load(&path)?;

    for cue in track.cues() {
        println!(
            "{} --> {}",
            format_mm_ss(cue.start_ms),
            format_mm_ss(cue.end_ms)
        );
        for run in &cue.runs {
            let mut flags = String::new();
            if run.bold {
                flags.push('b');
            }
            if run.italic {
                flags.push('i');
            }
            if let Some([r, g, b]) = run.color {
                flags.push_str(&format!("#{r:02X}{g:02X}{b:02X}"));
            }
            println!("  [{flags}] {:?}", run.text);
        }
    }
    if !track.errors().is_empty() {
        println!("{} cue(s) dropped:", track.errors().len());
        for err in track.errors() {
            println!("  {err}");
        }
    }

    if let Some(t) = args.next() {
        let t: u32 = t.parse().map_err(|_| "time_ms must be an integer")?;
        match track.active_at(t) {
            Some(cue) => println!("active at {t} ms: {:?}", cue.plain_text()),
            None => println!("active at {t} ms: none"),
        }
    }
    Ok(())
}
