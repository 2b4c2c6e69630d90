//! Chat with canned bot replies.

use cs_core::MessageKind;
use cs_mechanics::dice;

use crate::game::{Game, GameTask};

/// Lines the bot picks from when answering chat.
pub const BOT_RESPONSES: [&str; 5] = [
    "The ancient spirits whisper in the wind...",
    "A merchant offers rare items in the distance.",
    "The path ahead seems treacherous.",
    "You sense powerful magic nearby.",
    "The dragon's roar echoes through the mountains.",
];

impl Game {
    pub(crate) fn send_chat(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let line = format!("{}: {text}", self.player.name);
        self.chat.post(MessageKind::Player, line);
        self.scheduler
            .schedule(self.config.bot_reply_delay_ms, GameTask::BotReply);
    }

    pub(crate) fn bot_reply(&mut self) {
        let index = dice::pick_index(&mut self.rng, BOT_RESPONSES.len());
        self.post_system(BOT_RESPONSES[index]);
    }
}
