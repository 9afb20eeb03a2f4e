// ping.rs - Ping Command Module
// This module implements the ^ping command, which measures the bot's Discord
// round-trip time and checks that the waifu.pics gif API is reachable.
//
// Key Features:
// - Measures round-trip latency for Discord message handling
// - Probes the gif API so users can tell a dead API apart from a dead bot
//
// Used by: main.rs (command registration)

use serenity::{
    client::Context,
    framework::standard::{macros::command, Args, CommandResult},
    model::channel::Message,
};

use crate::reaction::{fetch_gif, Action};

/// Format the final ping report from the two measurements
fn format_ping_report(discord_ms: u128, api_ms: Option<u128>) -> String {
    match api_ms {
        Some(ms) => format!("Pong! Discord: {}ms • gif API: {}ms 💕", discord_ms, ms),
        None => format!("Pong! Discord: {}ms • gif API: unreachable 😢", discord_ms),
    }
}

#[command]
/// Main ^ping command handler
/// Replies with Discord round-trip time and gif API reachability
pub async fn ping(ctx: &Context, msg: &Message, _args: Args) -> CommandResult {
    let start_time = std::time::Instant::now();

    // Send the initial response and measure the Discord round-trip
    let response_result = msg.reply(ctx, "Pong! Checking in...").await;
    let discord_ms = start_time.elapsed().as_millis();

    // Probe the gif API with one of the fixed reaction endpoints
    let api_start = std::time::Instant::now();
    let api_ms = match fetch_gif(Action::Hug.endpoint()).await {
        Ok(_) => Some(api_start.elapsed().as_millis()),
        Err(e) => {
            log::warn!("gif API probe failed: {}", e);
            None
        }
    };

    // Update the message with the measurements
    if let Ok(mut response_msg) = response_result {
        let updated_content = format_ping_report(discord_ms, api_ms);

        if let Err(e) = response_msg.edit(&ctx.http, |m| m.content(updated_content)).await {
            eprintln!("[PING] Failed to update ping message with delay: {}", e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_report_with_reachable_api() {
        let report = format_ping_report(42, Some(117));
        assert_eq!(report, "Pong! Discord: 42ms • gif API: 117ms 💕");
    }

    #[test]
    fn test_ping_report_with_unreachable_api() {
        let report = format_ping_report(42, None);
        assert_eq!(report, "Pong! Discord: 42ms • gif API: unreachable 😢");
    }
}
