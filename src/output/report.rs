//! Terminal summary of a processed file.

use crate::dsp::Segment;
use std::io::{self, Write};
use std::path::Path;

/// Write a table of `segments` followed by the results directory.
pub fn write_summary<W: Write>(
    out: &mut W,
    source: &Path,
    segments: &[Segment],
    results_dir: &Path,
) -> io::Result<()> {
    writeln!(out, "{}", source.display())?;

    if segments.is_empty() {
        writeln!(out, "  No segments detected")?;
    } else {
        writeln!(out, "  {:>3}  {:>9}  {:>9}  {:>9}", "#", "start", "end", "duration")?;
        for (index, segment) in segments.iter().enumerate() {
            writeln!(
                out,
                "  {:>3}  {:>8.3}s  {:>8.3}s  {:>8.3}s",
                index + 1,
                segment.start,
                segment.end,
                segment.duration()
            )?;
        }
    }

    writeln!(out, "  Results: {}", results_dir.display())
}

/// Print the summary to stdout.
pub fn print_summary(source: &Path, segments: &[Segment], results_dir: &Path) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_summary(&mut handle, source, segments, results_dir)?;
    handle.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render(segments: &[Segment]) -> String {
        let mut buffer = Vec::new();
        write_summary(
            &mut buffer,
            Path::new("call.wav"),
            segments,
            Path::new("out/call"),
        )
        .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_summary_lists_each_segment() {
        let text = render(&[
            Segment {
                start: 0.5,
                end: 1.25,
            },
            Segment {
                start: 2.0,
                end: 3.0,
            },
        ]);
        assert!(text.starts_with("call.wav\n"));
        assert!(text.contains("    1     0.500s     1.250s     0.750s"));
        assert!(text.contains("    2     2.000s     3.000s     1.000s"));
        assert!(text.ends_with("Results: out/call\n"));
    }

    #[test]
    fn test_summary_without_segments() {
        let text = render(&[]);
        assert!(text.contains("No segments detected"));
        assert!(!text.contains("duration"));
    }
}
