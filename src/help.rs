use serenity::{
    client::Context,
    framework::standard::{
        macros::command,
        Args, CommandResult,
    },
    model::channel::Message,
};

#[command]
pub async fn help(ctx: &Context, msg: &Message, _args: Args) -> CommandResult {
    let _typing = ctx.http.start_typing(msg.channel_id.0)?;

    let response = format!(
        "**Reaction Bot**\n\n\
        **Reaction Commands:**\n\
        • `^hug @user` - Hug someone\n\
        • `^slap @user` - Slap someone\n\
        • `^pat @user` - Pat someone\n\
        • `^kiss @user` - Kiss someone\n\n\
        **Utility:**\n\
        • `^ping` - Test connectivity • `^help` - Show this help\n\n\
        Each reaction posts a random gif from waifu.pics, so the same command \
        gives a different gif every time.\n\n\
        **Setup:** `botconfig.txt` (token and prefix)"
    );

    msg.reply(ctx, &response).await?;
    Ok(())
}
