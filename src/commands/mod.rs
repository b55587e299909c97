//! This module aggregates all the command modules for the bot.

/// General purpose commands (e.g., help).
pub mod general;
/// Commands related to music playback.
pub mod music;

use crate::{Data, Error};

/// Every command the bot answers to, in the order they appear in the help text.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    use general::help::*;
    use music::{
        leave::*, list::*, pause::*, play::*, queue::*, resume::*, skip::*, stop::*,
    };

    vec![
        play(),
        skip(),
        queue(),
        list(),
        stop(),
        pause(),
        resume(),
        leave(),
        help(),
    ]
}
