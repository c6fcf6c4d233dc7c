//! A chat room where a moderator filters messages before they are delivered.
//!
//! Run with `cargo run -p rusty_emitter --example chat_moderation`.

use std::{sync::Arc, thread, time::Duration};

use rusty_emitter::{Cancellation, Emitter, Event, HandlerResult, Priority};

#[derive(Event, Clone, Debug)]
struct ChatMessage {
    author: String,
    text: String,
    cancellation: Cancellation,
}

impl ChatMessage {
    fn new(author: &str, text: &str) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            cancellation: Cancellation::new(),
        }
    }
}

const BANNED: [&str; 2] = ["spam", "scam"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let room = Arc::new(Emitter::<ChatMessage>::new());

    // Moderation runs before delivery and may drop the message.
    room.on_with_priority(
        "lobby",
        |_: &str, message: &mut ChatMessage| -> HandlerResult {
            if BANNED.iter().any(|word| message.text.contains(word)) {
                println!("moderator: dropped message from {}", message.author);
                message.cancel();
            }
            Ok(())
        },
        Priority::High,
    );

    room.on("lobby", |channel: &str, message: &mut ChatMessage| -> HandlerResult {
        println!("[{channel}] {}: {}", message.author, message.text);
        Ok(())
    });

    // A bot that only wants the first message after it joins.
    let bot = {
        let room = Arc::clone(&room);
        thread::spawn(move || room.wait_for_timeout("lobby", Duration::from_secs(1)))
    };
    while room.listener_count("lobby") < 3 {
        thread::yield_now();
    }

    for (author, text) in [
        ("alice", "hi all"),
        ("mallory", "cheap spam here"),
        ("bob", "hey alice"),
    ] {
        let dispatch = room.emit("lobby", &mut ChatMessage::new(author, text))?;
        if dispatch.cancelled {
            println!("  ({} handler(s) ran before cancellation)", dispatch.invoked);
        }
    }

    let first = bot.join().expect("bot thread panicked")?;
    println!("bot saw: {} from {}", first.text, first.author);

    Ok(())
}
