use auto_listener::prelude::*;
use auto_listener::EventManager;

#[generate_listeners]
mod bot {
    use auto_listener::events::*;

    #[auto_listener]
    #[derive(Default)]
    pub struct CommandHandler {
        reminders: Vec<String>,
    }

    impl CommandHandler {
        // Fires whenever a message is received.
        pub fn on_message_send(&mut self, event: &MessageReceivedEvent) {
            if event.content.starts_with("!ping") {
                self.handle_ping(event);
            }
            if event.content.starts_with("!remind") {
                self.handle_remind(event);
            }
        }

        pub fn reminders(&self) -> &[String] {
            &self.reminders
        }

        // Private methods are not part of the listener.

        fn handle_ping(&self, event: &MessageReceivedEvent) {
            println!("#{}: Pong!", event.channel_id);
        }

        fn handle_remind(&mut self, event: &MessageReceivedEvent) {
            println!("#{}: I'll remind you in a bit!", event.channel_id);
            self.reminders.push(format!("@{} Here's your reminder!", event.author));
        }
    }
}

fn main() {
    let manager = EventManager::new();
    manager.register(bot::CommandHandlerListener::new());

    for content in &["!ping", "hello", "!remind me"] {
        manager.dispatch(&MessageReceivedEvent {
            message_id: 1,
            channel_id: 100,
            author: "kaidan".to_string(),
            content: content.to_string(),
        });
    }

    let mut handler = bot::CommandHandlerListener::new();
    handler.on_event(&MessageReceivedEvent { content: "!remind".to_string(), ..Default::default() });
    println!("{:?}", handler.reminders());
}
