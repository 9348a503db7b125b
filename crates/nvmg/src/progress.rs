use nvmg_model::{InstallPhase, InstallProgress};
use tokio::sync::mpsc;

/// Render progress events as stderr lines until the sender side closes.
pub async fn report(mut receiver: mpsc::Receiver<InstallProgress>) {
    let mut last_decile = None;
    while let Some(event) = receiver.recv().await {
        if let Some(line) = render(&event, &mut last_decile) {
            eprintln!("{line}");
        }
    }
}

fn render(event: &InstallProgress, last_decile: &mut Option<u64>) -> Option<String> {
    match event {
        InstallProgress::Phase(InstallPhase::Done) => None,
        InstallProgress::Phase(phase) => Some(format!("{phase}...")),
        InstallProgress::Downloading {
            downloaded,
            total: Some(total),
        } if *total > 0 => {
            let decile = downloaded.saturating_mul(10) / total;
            if *last_decile == Some(decile) {
                return None;
            }
            *last_decile = Some(decile);
            Some(format!(
                "  {}% ({downloaded} of {total} bytes)",
                decile * 10
            ))
        }
        InstallProgress::Downloading { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use nvmg_model::{InstallPhase, InstallProgress};

    use super::render;

    #[test]
    fn phases_render_as_single_lines() {
        let mut last = None;

        assert_eq!(
            render(&InstallProgress::Phase(InstallPhase::Downloading), &mut last),
            Some("downloading...".to_string())
        );
        assert_eq!(
            render(&InstallProgress::Phase(InstallPhase::Done), &mut last),
            None
        );
    }

    #[test]
    fn download_progress_is_reported_once_per_tenth() {
        let mut last = None;
        let event = |downloaded| InstallProgress::Downloading {
            downloaded,
            total: Some(1000),
        };

        assert_eq!(
            render(&event(50), &mut last),
            Some("  0% (50 of 1000 bytes)".to_string())
        );
        assert_eq!(render(&event(90), &mut last), None);
        assert_eq!(
            render(&event(500), &mut last),
            Some("  50% (500 of 1000 bytes)".to_string())
        );
        assert_eq!(
            render(&event(1000), &mut last),
            Some("  100% (1000 of 1000 bytes)".to_string())
        );
    }

    #[test]
    fn unknown_total_is_silent() {
        let mut last = None;

        assert_eq!(
            render(
                &InstallProgress::Downloading {
                    downloaded: 10,
                    total: None
                },
                &mut last
            ),
            None
        );
    }
}
