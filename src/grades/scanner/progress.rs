use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Files below this count are scanned without a progress bar
const PROGRESS_BAR_THRESHOLD: usize = 10;

/// Progress tracker for displaying progress during scanning
#[derive(Debug, Clone, Copy)]
pub struct ProgressTracker {
    enabled: bool,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Run `operation` on every path in order, stopping at the first error
    pub fn track_path_progress<F>(&self, paths: &[PathBuf], mut operation: F) -> Result<()>
    where
        F: FnMut(&PathBuf) -> Result<()>,
    {
        let progress_bar = if self.enabled && paths.len() > PROGRESS_BAR_THRESHOLD {
            let pb = ProgressBar::new(paths.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta}) {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        for path in paths {
            if let Some(pb) = &progress_bar {
                if let Some(file_name) = path.file_name() {
                    pb.set_message(format!("Processing: {}", file_name.to_string_lossy()));
                }
            }

            let outcome = operation(path);

            if let Some(pb) = &progress_bar {
                match &outcome {
                    Ok(()) => pb.inc(1),
                    Err(_) => pb.abandon_with_message("Scan aborted"),
                }
            }
            outcome?;
        }

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Processing complete");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[test]
    fn test_visits_paths_in_order() -> Result<()> {
        let paths: Vec<PathBuf> = (0..12).map(|i| PathBuf::from(format!("{i}.pdf"))).collect();
        let mut seen = Vec::new();
        ProgressTracker::new(false).track_path_progress(&paths, |p| {
            seen.push(p.clone());
            Ok(())
        })?;
        assert_eq!(seen, paths);
        Ok(())
    }

    #[test]
    fn test_stops_at_first_error() {
        let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf"), PathBuf::from("c.pdf")];
        let mut visited = 0;
        let result = ProgressTracker::new(false).track_path_progress(&paths, |p| {
            visited += 1;
            if p.ends_with("b.pdf") {
                bail!("broken");
            }
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(visited, 2);
    }
}
