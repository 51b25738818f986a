use std::io::IsTerminal;
use std::time::Duration;

use miette::Result;
use relay_core::RelayConfig;
use relay_review::pipeline::ReviewRelay;

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let config = RelayConfig::from_env()?;
    let relay = ReviewRelay::from_config(&config)?;

    let is_tty = std::io::stderr().is_terminal();
    let spinner = if is_tty {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    progress(&spinner, &format!("Fetching files for PR #{}...", relay.pull_number()));
    let files = relay.fetch_files().await.inspect_err(|_e| {
        if let Some(pb) = &spinner {
            pb.finish_with_message("Failed to fetch PR files");
        }
    })?;

    progress(&spinner, &format!("Requesting review for {} files...", files.len()));
    let review = relay.generate_review(&files).await.inspect_err(|_e| {
        if let Some(pb) = &spinner {
            pb.finish_with_message("Review request failed");
        }
    })?;

    progress(&spinner, "Posting review comment...");
    relay.publish_review(&review).await.inspect_err(|_e| {
        if let Some(pb) = &spinner {
            pb.finish_with_message("Failed to post comment");
        }
    })?;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    println!("Claude review comment posted to PR.");

    Ok(())
}

fn progress(spinner: &Option<indicatif::ProgressBar>, message: &str) {
    match spinner {
        Some(pb) => pb.set_message(message.to_string()),
        None => eprintln!("{message}"),
    }
}
