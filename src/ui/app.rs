use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::common::{FaqEntry, Phase, View, WidgetCommand, WidgetEvent};
use crate::config::ContactConfig;

use super::components::input_bar::{self, InputAction};
use super::components::{chat_area, contact_card, faq_list};
use super::state::AppState;

/// Line-oriented frontend: reads commands from stdin, prints controller events.
pub struct TerminalApp {
    state: AppState,
    faq: Vec<FaqEntry>,
    contact: ContactConfig,
    command_sender: Option<mpsc::Sender<WidgetCommand>>,
    event_receiver: mpsc::Receiver<WidgetEvent>,
}

impl TerminalApp {
    pub fn new(
        faq: Vec<FaqEntry>,
        contact: ContactConfig,
        command_sender: mpsc::Sender<WidgetCommand>,
        event_receiver: mpsc::Receiver<WidgetEvent>,
    ) -> Self {
        Self {
            state: AppState::new(),
            faq,
            contact,
            command_sender: Some(command_sender),
            event_receiver,
        }
    }

    /// Run on stdin until the user quits and the controller has delivered
    /// every reply.
    pub async fn run(self) -> std::io::Result<()> {
        self.run_with(BufReader::new(tokio::io::stdin())).await?;
        Ok(())
    }

    /// Drive the app from any line source; returns the final mirror once the
    /// controller has closed the event channel.
    pub async fn run_with<R>(mut self, input: R) -> std::io::Result<AppState>
    where
        R: AsyncBufRead + Unpin,
    {
        println!("{}", faq_list::view_banner(View::Home));
        let mut lines = input.lines();

        loop {
            tokio::select! {
                line = lines.next_line(), if self.command_sender.is_some() => {
                    match line? {
                        Some(line) => self.handle_line(&line).await,
                        None => self.close_input(),
                    }
                }
                event = self.event_receiver.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
            }
        }

        Ok(self.state)
    }

    async fn handle_line(&mut self, line: &str) {
        match input_bar::parse(line, &self.faq) {
            InputAction::Command(command) => self.send_command(command).await,
            InputAction::Help => println!("{}", input_bar::HELP),
            InputAction::Contact => {
                for line in contact_card::render(&self.contact) {
                    println!("{line}");
                }
            }
            InputAction::Quit => self.close_input(),
            InputAction::Nothing => {}
            InputAction::Invalid(reason) => println!("{reason}"),
        }
    }

    /// Stop reading input; the controller drains queued work, then closes
    /// the event channel, which ends [`run`](Self::run).
    fn close_input(&mut self) {
        if self.command_sender.take().is_some() && self.state.phase == Phase::Busy {
            println!("Waiting for pending replies...");
        }
    }

    /// Wait for room on the command channel, printing events meanwhile; the
    /// controller may itself be blocked on a full event channel.
    async fn send_command(&mut self, command: WidgetCommand) {
        let Some(sender) = self.command_sender.clone() else {
            return;
        };

        let reserved = loop {
            tokio::select! {
                permit = sender.reserve() => break permit,
                event = self.event_receiver.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        log::warn!("Controller stopped; dropping {command:?}");
                        return;
                    }
                },
            }
        };

        match reserved {
            Ok(permit) => permit.send(command),
            Err(err) => log::warn!("Failed to send command to controller: {err}"),
        }
    }

    fn handle_event(&mut self, event: WidgetEvent) {
        self.state.apply(&event);
        match event {
            WidgetEvent::HistoryRestored(history) => {
                for message in &history {
                    println!("{}", chat_area::render_message(message));
                }
            }
            WidgetEvent::MessageAppended(message) => {
                println!("{}", chat_area::render_message(&message));
            }
            WidgetEvent::Typing(Some(indicator)) => {
                println!("{}", chat_area::render_typing(&indicator));
            }
            WidgetEvent::Typing(None) | WidgetEvent::PhaseChanged(_) => {}
            WidgetEvent::ViewChanged(view) => {
                println!("{}", faq_list::view_banner(view));
                if view == View::Faq {
                    for line in faq_list::render(&self.faq) {
                        println!("{line}");
                    }
                }
            }
        }
    }
}

/// Submit one message and print the whole session: the restored history,
/// the echo and every reply. Returns the printed lines.
pub async fn ask(
    command_sender: mpsc::Sender<WidgetCommand>,
    mut event_receiver: mpsc::Receiver<WidgetEvent>,
    text: String,
) -> Result<Vec<String>, mpsc::error::SendError<WidgetCommand>> {
    command_sender.send(WidgetCommand::Submit(text)).await?;
    drop(command_sender);

    let mut printed = Vec::new();
    while let Some(event) = event_receiver.recv().await {
        let rendered: Vec<String> = match event {
            WidgetEvent::HistoryRestored(history) => {
                history.iter().map(chat_area::render_message).collect()
            }
            WidgetEvent::MessageAppended(message) => vec![chat_area::render_message(&message)],
            _ => Vec::new(),
        };
        for line in rendered {
            println!("{line}");
            printed.push(line);
        }
    }

    Ok(printed)
}
