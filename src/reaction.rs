// reaction.rs - Reaction Command Module
// This module implements the ^hug, ^slap, ^pat and ^kiss commands, which fetch
// a random reaction gif from the waifu.pics API and post it as a styled embed.
//
// Key Features:
// - Four reaction commands backed by one generic handler
// - Random gif fetched per invocation (no caching)
// - Styled embed with author block, random color and fixed footer
//
// Used by: main.rs (command registration)

use rand::Rng;
use serde::Deserialize;
use serenity::{
    builder::CreateEmbed,
    client::Context,
    framework::standard::{macros::command, Args, CommandResult},
    model::{channel::Message, id::UserId, user::User},
};
use thiserror::Error;

/// Fixed footer shown on every reaction embed
const FOOTER_TEXT: &str = "made with 💖";
const FOOTER_ICON_URL: &str = "https://cdn.discordapp.com/emojis/1406415719951761449.gif";

/// Error types for gif fetching
#[derive(Debug, Error)]
pub enum ReactionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("API response was not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API response is missing the \"url\" key")]
    MissingUrl,
}

/// The four supported reaction actions. Each one maps to a fixed waifu.pics
/// endpoint and a verb used in the embed description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hug,
    Slap,
    Pat,
    Kiss,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Hug, Action::Slap, Action::Pat, Action::Kiss];

    /// Lowercase action label, also the verb stem in the description
    pub fn label(self) -> &'static str {
        match self {
            Action::Hug => "hug",
            Action::Slap => "slap",
            Action::Pat => "pat",
            Action::Kiss => "kiss",
        }
    }

    /// Fixed API endpoint for this action
    pub fn endpoint(self) -> &'static str {
        match self {
            Action::Hug => "https://api.waifu.pics/sfw/hug",
            Action::Slap => "https://api.waifu.pics/sfw/slap",
            Action::Pat => "https://api.waifu.pics/sfw/pat",
            Action::Kiss => "https://api.waifu.pics/sfw/kiss",
        }
    }

    /// Embed title: capitalized label plus the decorative suffix
    pub fn title(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        format!("{} ✨", capitalized)
    }

    /// Notice sent when a user targets themself instead of someone else
    pub fn self_notice(self) -> &'static str {
        match self {
            Action::Hug => "You hug yourself... are you okay?",
            Action::Slap => "You slap yourself... that must hurt!",
            Action::Pat => "You pat yourself on the back!",
            Action::Kiss => "You kiss yourself in the mirror... narcissist much?",
        }
    }
}

/// User fields the embed needs, resolved once at construction time so the
/// payload can be built and inspected without a live gateway connection.
#[derive(Debug, Clone)]
pub struct ReactionUser {
    pub name: String,
    pub mention: String,
    pub avatar_url: Option<String>,
    pub default_avatar_url: String,
}

impl From<&User> for ReactionUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            mention: format!("<@{}>", user.id),
            avatar_url: user.avatar_url(),
            default_avatar_url: user.default_avatar_url(),
        }
    }
}

/// Fully populated embed payload for one reaction. Ephemeral - built, sent
/// and discarded within a single command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub image_url: String,
    pub author_name: String,
    pub author_icon_url: String,
    pub footer_text: String,
    pub footer_icon_url: String,
}

/// Build the embed payload for a reaction. The color is re-rolled on every
/// call, so identical inputs produce embeds that differ only in color.
pub fn build_embed(
    author: &ReactionUser,
    target: &ReactionUser,
    action: Action,
    gif_url: &str,
) -> ReactionEmbed {
    let author_icon = author
        .avatar_url
        .clone()
        .unwrap_or_else(|| author.default_avatar_url.clone());

    ReactionEmbed {
        title: action.title(),
        description: format!(
            "{} {}s {} 💕",
            author.mention,
            action.label(),
            target.mention
        ),
        color: rand::thread_rng().gen_range(0..0x100_0000),
        image_url: gif_url.to_string(),
        author_name: author.name.clone(),
        author_icon_url: author_icon,
        footer_text: FOOTER_TEXT.to_string(),
        footer_icon_url: FOOTER_ICON_URL.to_string(),
    }
}

/// Apply a payload onto serenity's embed builder
fn apply_embed<'a>(e: &'a mut CreateEmbed, payload: &ReactionEmbed) -> &'a mut CreateEmbed {
    e.title(&payload.title)
        .description(&payload.description)
        .color(payload.color)
        .image(&payload.image_url)
        .author(|a| a.name(&payload.author_name).icon_url(&payload.author_icon_url))
        .footer(|f| f.text(&payload.footer_text).icon_url(&payload.footer_icon_url))
}

/// API response structure for a gif lookup
#[derive(Deserialize)]
struct GifResponse {
    url: Option<String>,
}

/// Extract the gif URL from an API response body of shape {"url": "..."}
fn parse_gif_url(body: &str) -> Result<String, ReactionError> {
    let response: GifResponse = serde_json::from_str(body)?;
    response.url.ok_or(ReactionError::MissingUrl)
}

/// Fetch a random gif URL from the given API endpoint.
/// One GET per call, no retries, no caching of results across calls.
pub async fn fetch_gif(endpoint: &str) -> Result<String, ReactionError> {
    let client = reqwest::Client::new();
    let response = client.get(endpoint).send().await?;

    if !response.status().is_success() {
        return Err(ReactionError::Status(response.status()));
    }

    let body = response.text().await?;
    parse_gif_url(&body)
}

/// Parse a user mention of the form <@123456789> or <@!123456789>
fn parse_user_mention(args_str: &str) -> Option<UserId> {
    if args_str.starts_with("<@") && args_str.ends_with('>') {
        let id_str = args_str
            .trim_start_matches("<@")
            .trim_end_matches('>')
            .trim_start_matches('!');
        id_str.parse::<u64>().ok().map(UserId)
    } else {
        None
    }
}

/// Generic handler shared by all four reaction commands:
/// resolve the mentioned user, fetch a gif, build the embed, send it.
async fn send_reaction(ctx: &Context, msg: &Message, args: Args, action: Action) -> CommandResult {
    let args_str = args.message().trim();

    if args_str.is_empty() {
        msg.reply(
            ctx,
            format!("❌ Please mention a user! Usage: `^{} @user`", action.label()),
        )
        .await?;
        return Ok(());
    }

    let user_id = match parse_user_mention(args_str) {
        Some(id) => id,
        None => {
            msg.reply(
                ctx,
                format!("❌ Invalid user mention! Please use `^{} @user`", action.label()),
            )
            .await?;
            return Ok(());
        }
    };

    let target = match ctx.http.get_user(user_id.into()).await {
        Ok(user) => user,
        Err(_) => {
            msg.reply(ctx, "❌ User not found!").await?;
            return Ok(());
        }
    };

    if target.id == msg.author.id {
        msg.reply(ctx, action.self_notice()).await?;
        return Ok(());
    }

    let _typing = ctx.http.start_typing(msg.channel_id.0)?;

    let gif_url = match fetch_gif(action.endpoint()).await {
        Ok(url) => url,
        Err(e) => {
            log::error!("❌ Failed to fetch {} gif: {}", action.label(), e);
            eprintln!("[REACTION] Failed to fetch {} gif: {}", action.label(), e);
            msg.reply(ctx, "❌ Couldn't fetch a gif, try again later!").await?;
            return Err(e.into());
        }
    };

    let author = ReactionUser::from(&msg.author);
    let target = ReactionUser::from(&target);
    let payload = build_embed(&author, &target, action, &gif_url);

    msg.channel_id
        .send_message(&ctx.http, |m| m.embed(|e| apply_embed(e, &payload)))
        .await?;

    Ok(())
}

#[command]
/// ^hug @user - hug the mentioned user
pub async fn hug(ctx: &Context, msg: &Message, args: Args) -> CommandResult {
    send_reaction(ctx, msg, args, Action::Hug).await
}

#[command]
/// ^slap @user - slap the mentioned user
pub async fn slap(ctx: &Context, msg: &Message, args: Args) -> CommandResult {
    send_reaction(ctx, msg, args, Action::Slap).await
}

#[command]
/// ^pat @user - pat the mentioned user
pub async fn pat(ctx: &Context, msg: &Message, args: Args) -> CommandResult {
    send_reaction(ctx, msg, args, Action::Pat).await
}

#[command]
/// ^kiss @user - kiss the mentioned user
pub async fn kiss(ctx: &Context, msg: &Message, args: Args) -> CommandResult {
    send_reaction(ctx, msg, args, Action::Kiss).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, id: u64, avatar_url: Option<&str>) -> ReactionUser {
        ReactionUser {
            name: name.to_string(),
            mention: format!("<@{}>", id),
            avatar_url: avatar_url.map(str::to_string),
            default_avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
        }
    }

    #[test]
    fn test_action_endpoints() {
        assert_eq!(Action::Hug.endpoint(), "https://api.waifu.pics/sfw/hug");
        assert_eq!(Action::Slap.endpoint(), "https://api.waifu.pics/sfw/slap");
        assert_eq!(Action::Pat.endpoint(), "https://api.waifu.pics/sfw/pat");
        assert_eq!(Action::Kiss.endpoint(), "https://api.waifu.pics/sfw/kiss");
    }

    #[test]
    fn test_action_titles() {
        assert_eq!(Action::Hug.title(), "Hug ✨");
        assert_eq!(Action::Slap.title(), "Slap ✨");
        assert_eq!(Action::Pat.title(), "Pat ✨");
        assert_eq!(Action::Kiss.title(), "Kiss ✨");
    }

    #[test]
    fn test_parse_gif_url() {
        let url = parse_gif_url(r#"{"url": "https://i.waifu.pics/abc.gif"}"#).unwrap();
        assert_eq!(url, "https://i.waifu.pics/abc.gif");
    }

    #[test]
    fn test_parse_gif_url_missing_key() {
        let result = parse_gif_url(r#"{"file": "abc.gif"}"#);
        assert!(matches!(result, Err(ReactionError::MissingUrl)));

        let result = parse_gif_url(r#"{"url": null}"#);
        assert!(matches!(result, Err(ReactionError::MissingUrl)));
    }

    #[test]
    fn test_parse_gif_url_invalid_json() {
        let result = parse_gif_url("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(ReactionError::Json(_))));
    }

    #[test]
    fn test_parse_user_mention() {
        assert_eq!(parse_user_mention("<@123456789>"), Some(UserId(123456789)));
        assert_eq!(parse_user_mention("<@!123456789>"), Some(UserId(123456789)));
        assert_eq!(parse_user_mention("someuser"), None);
        assert_eq!(parse_user_mention("<@notanumber>"), None);
    }

    #[test]
    fn test_embed_image_and_description() {
        let author = user("alice", 1, Some("https://cdn.discordapp.com/avatars/1/a.png"));
        let target = user("bob", 2, None);

        for action in Action::ALL {
            let embed = build_embed(&author, &target, action, "https://i.waifu.pics/x.gif");
            assert_eq!(embed.image_url, "https://i.waifu.pics/x.gif");
            assert!(embed.description.contains("<@1>"));
            assert!(embed.description.contains("<@2>"));
            assert!(embed.description.contains(&format!("{}s", action.label())));
            assert_eq!(embed.title, action.title());
        }
    }

    #[test]
    fn test_author_icon_avatar_fallback() {
        let with_avatar = user("alice", 1, Some("https://cdn.discordapp.com/avatars/1/a.png"));
        let without_avatar = user("alice", 1, None);
        let target = user("bob", 2, None);

        let embed = build_embed(&with_avatar, &target, Action::Hug, "https://x/y.gif");
        assert_eq!(embed.author_icon_url, "https://cdn.discordapp.com/avatars/1/a.png");

        let embed = build_embed(&without_avatar, &target, Action::Hug, "https://x/y.gif");
        assert_eq!(embed.author_icon_url, without_avatar.default_avatar_url);
    }

    #[test]
    fn test_embed_stable_except_color() {
        let author = user("alice", 1, None);
        let target = user("bob", 2, None);

        let a = build_embed(&author, &target, Action::Pat, "https://x/y.gif");
        let b = build_embed(&author, &target, Action::Pat, "https://x/y.gif");

        // Color is rolled per call and may differ; everything else must match.
        assert_eq!(a.title, b.title);
        assert_eq!(a.description, b.description);
        assert_eq!(a.image_url, b.image_url);
        assert_eq!(a.author_name, b.author_name);
        assert_eq!(a.author_icon_url, b.author_icon_url);
        assert_eq!(a.footer_text, b.footer_text);
        assert_eq!(a.footer_icon_url, b.footer_icon_url);
        assert!(a.color < 0x100_0000 && b.color < 0x100_0000);
    }

    #[test]
    fn test_footer_is_fixed() {
        let author = user("alice", 1, None);
        let target = user("bob", 2, None);
        let embed = build_embed(&author, &target, Action::Kiss, "https://x/y.gif");
        assert_eq!(embed.footer_text, "made with 💖");
        assert_eq!(embed.footer_icon_url, FOOTER_ICON_URL);
    }
}
