//! Main app runner: the interactive deck loop

use std::process::ExitCode;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::ports::{ConfigStore, PlaybackSink};
use crate::application::{RecorderDeck, StatusObserver};
use crate::domain::config::AppConfig;
use crate::domain::deck::Status;
use crate::infrastructure::{CpalCapture, NoopSink, RodioSink, WavCodec, XdgConfigStore};

use super::args::DeckOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Run the interactive deck
pub async fn run_deck(options: DeckOptions) -> ExitCode {
    if options.mute {
        run_deck_with_sink(options, NoopSink::new()).await
    } else {
        run_deck_with_sink(options, RodioSink::new()).await
    }
}

async fn run_deck_with_sink<P>(options: DeckOptions, sink: P) -> ExitCode
where
    P: PlaybackSink + 'static,
{
    let presenter = Arc::new(StdMutex::new(Presenter::new()));

    let capture = CpalCapture::new(options.device.clone(), options.sample_rate);
    let codec = WavCodec::new();

    // Every deck transition lands here as a status line; recording gets a
    // spinner so the terminal shows liveness while the user types
    let observer: StatusObserver = {
        let presenter = Arc::clone(&presenter);
        Arc::new(move |status: &Status| {
            let mut presenter = presenter.lock().unwrap();
            match status {
                Status::Recording => presenter.start_spinner("recording (s + Enter to stop)"),
                _ => {
                    presenter.stop_spinner();
                    if status.is_error() {
                        presenter.error(&status.to_string());
                    } else {
                        presenter.status(&status.to_string());
                    }
                }
            }
        })
    };

    let deck = RecorderDeck::new(capture, codec, sink).with_observer(observer);

    {
        let presenter = presenter.lock().unwrap();
        presenter.info("backspin: record a take, then play it forwards or backwards");
        presenter.info("commands: r record, s stop, p play, b play backwards, q quit");
        presenter.status("idle");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // stdin closed
            Err(e) => {
                presenter
                    .lock()
                    .unwrap()
                    .error(&format!("failed to read input: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        };

        let result = match line.trim() {
            "" => Ok(()),
            "r" | "record" => deck.start_capture().await,
            "s" | "stop" => {
                let was_recording = deck.is_recording().await;
                let result = deck.stop_capture().await;
                if was_recording && result.is_ok() {
                    if let Some(size) = deck.clip_size().await {
                        presenter
                            .lock()
                            .unwrap()
                            .info(&format!("clip ready ({})", size));
                    }
                }
                result
            }
            "p" | "play" => deck.play_original().await,
            "b" | "back" => deck.play_reversed().await,
            "q" | "quit" => break,
            other => {
                presenter
                    .lock()
                    .unwrap()
                    .warn(&format!("unknown command: {}", other));
                Ok(())
            }
        };

        if let Err(e) = result {
            presenter.lock().unwrap().error(&e.to_string());
        }
    }

    presenter.lock().unwrap().stop_spinner();
    ExitCode::from(EXIT_SUCCESS)
}
