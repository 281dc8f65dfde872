use crate::messages::{Event, HostEvent, UiEvent};
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Stand-in for the chat host's event bus.
///
/// A real host would call into the controller from its own message and
/// visibility signals; here a line reader on stdin plays that role so the
/// daemon can be driven by hand. One command per line: `msg`, `hide`,
/// `show`, `on`/`off` followed by `master`, `reminder`, `notify` or
/// `tick`, `perm`, `test`, `quit`.
pub async fn read_stdin(tx: mpsc::Sender<Event>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }
        match parse_line(line) {
            Some(event) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            None => tracing::warn!("Unknown command: {:?}", line),
        }
    }

    Ok(())
}

pub fn parse_line(line: &str) -> Option<Event> {
    let mut parts = line.split_whitespace();
    let event = match (parts.next()?, parts.next()) {
        ("msg", None) => Event::Host(HostEvent::MessageReceived),
        ("hide", None) => Event::Host(HostEvent::VisibilityChanged { hidden: true }),
        ("show", None) => Event::Host(HostEvent::VisibilityChanged { hidden: false }),
        ("perm", None) => Event::Ui(UiEvent::RequestPermissionPressed),
        ("test", None) => Event::Ui(UiEvent::TestSoundPressed),
        (verb @ ("on" | "off"), Some(channel)) => {
            let on = verb == "on";
            match channel {
                "master" => Event::Ui(UiEvent::MasterToggled(on)),
                "reminder" => Event::Ui(UiEvent::ReminderToggled(on)),
                "notify" => Event::Ui(UiEvent::NotificationToggled {
                    on,
                    user_initiated: true,
                }),
                "tick" => Event::Ui(UiEvent::TickSoundToggled(on)),
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(event)
}
