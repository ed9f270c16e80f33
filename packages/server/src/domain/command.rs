//! Command dispatch for raw client input.
//!
//! This module contains pure functions that turn one line of client input
//! into a list of [`Effect`]s. Nothing here touches shared state; the
//! coordinator applies the effects in order.

use std::time::Duration;

use snakk_shared::time::format_uptime;

use super::{ChatEvent, Color, Nickname, User, ValueObjectError};

/// A slash-command and its usage text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// Commands understood by the room
pub const COMMANDS: [CommandSpec; 4] = [
    CommandSpec {
        name: "nick",
        description: "'/nick <nickname>', sets your nickname.",
    },
    CommandSpec {
        name: "help",
        description: "'/help', shows the list of commands. '/help <command>', shows command usage.",
    },
    CommandSpec {
        name: "me",
        description: "'/me <action>', sends action to the chatroom (actions are written in 3rd person).",
    },
    CommandSpec {
        name: "uptime",
        description: "'/uptime', displays how long server has been running.",
    },
];

pub const MSG_NICK_REQUIRED: &str = "You must choose a nickname before you can join the chat.";
pub const MSG_NICK_EMPTY: &str = "Your nickname cannot be empty.";
pub const MSG_NICK_TAKEN: &str = "That nick is already taken. Choose another one.";
pub const MSG_UNKNOWN_COMMAND: &str = "Unknown command.";
pub const MSG_HELP: &str = "Available commands: nick, me, help, uptime. Type /help <command> for usage information.";

/// Parsed form of one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// Nothing but whitespace
    Blank,
    /// `/name argument`; `name` is lower-cased, `argument` is everything
    /// after the first space, unsplit
    Command { name: String, argument: &'a str },
    /// Any other line
    Message(&'a str),
}

/// A state change or delivery the coordinator must carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send to the connection that issued the input
    Reply(ChatEvent),
    /// Send to every member of the room
    Broadcast(ChatEvent),
    /// Send to every member except the issuing connection
    BroadcastOthers(ChatEvent),
    /// Set the issuing connection's nickname
    ClaimNickname(Nickname),
}

/// Everything the dispatcher may look at
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    /// The user behind the issuing connection
    pub sender: &'a User,
    /// Users of every live connection, used for nickname collision checks
    pub members: &'a [User],
    /// How long the server has been running
    pub uptime: Duration,
}

/// Parse one line of input.
///
/// Leading and trailing whitespace is trimmed first. A line starting with
/// `/` is a command whose name runs up to the first space.
pub fn parse(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Blank;
    }
    match line.strip_prefix('/') {
        Some(rest) => {
            let (name, argument) = rest.split_once(' ').unwrap_or((rest, ""));
            Input::Command {
                name: name.to_lowercase(),
                argument,
            }
        }
        None => Input::Message(line),
    }
}

/// Interpret one line of input from `ctx.sender`.
///
/// # Arguments
///
/// * `line` - Raw text received from the connection
/// * `ctx` - Sender, room members and uptime
///
/// # Returns
///
/// The effects to apply, in order. Blank input from a user with a nickname
/// yields no effects.
pub fn dispatch(line: &str, ctx: &DispatchContext<'_>) -> Vec<Effect> {
    let input = parse(line);

    let claiming = matches!(&input, Input::Command { name, .. } if name == "nick");
    let nick = match &ctx.sender.nickname {
        Some(nick) => Some(nick),
        None if claiming => None,
        None => return vec![reply_error(MSG_NICK_REQUIRED)],
    };

    match (input, nick) {
        (Input::Blank, _) => Vec::new(),
        (Input::Command { name, argument }, nick) => match name.as_str() {
            "nick" => nick_command(argument, ctx),
            "me" => match nick {
                Some(nick) => me_command(nick, argument),
                None => vec![reply_error(MSG_NICK_REQUIRED)],
            },
            "help" => help_command(argument),
            "uptime" => vec![Effect::Reply(ChatEvent::direct(
                Color::Green,
                format!(
                    "The server has been running for {}.",
                    format_uptime(ctx.uptime)
                ),
            ))],
            _ => vec![reply_error(MSG_UNKNOWN_COMMAND)],
        },
        (Input::Message(text), Some(nick)) => vec![Effect::Broadcast(ChatEvent::chat(nick, text))],
        (Input::Message(_), None) => vec![reply_error(MSG_NICK_REQUIRED)],
    }
}

/// Check whether `nick` is held by a member other than `sender`
pub fn is_nickname_taken(members: &[User], sender: &User, nick: &Nickname) -> bool {
    members
        .iter()
        .any(|member| member.id != sender.id && member.nickname.as_ref() == Some(nick))
}

fn reply_error(message: &str) -> Effect {
    Effect::Reply(ChatEvent::direct(Color::Red, message))
}

fn nick_command(argument: &str, ctx: &DispatchContext<'_>) -> Vec<Effect> {
    let nick = match Nickname::new(argument) {
        Ok(nick) => nick,
        Err(ValueObjectError::NicknameEmpty) => return vec![reply_error(MSG_NICK_EMPTY)],
    };
    if is_nickname_taken(ctx.members, ctx.sender, &nick) {
        return vec![reply_error(MSG_NICK_TAKEN)];
    }

    let id = ctx.sender.id;
    let confirmation = ChatEvent::direct(Color::Green, format!("You are now known as {}", nick))
        .with_user_change(id)
        .with_user_nick(nick.clone());
    let announcement = match &ctx.sender.nickname {
        Some(old) => ChatEvent::notice(Color::Green, format!("{} is now known as {}", old, nick))
            .with_user_change(id),
        None => ChatEvent::notice(Color::Green, format!("{} has joined the chat", nick))
            .with_user_new(id),
    }
    .with_user_nick(nick.clone());

    vec![
        Effect::ClaimNickname(nick),
        Effect::Reply(confirmation),
        Effect::BroadcastOthers(announcement),
    ]
}

fn me_command(nick: &Nickname, action: &str) -> Vec<Effect> {
    if action.trim().is_empty() {
        return vec![Effect::Reply(ChatEvent::direct(
            Color::Green,
            COMMANDS[2].description,
        ))];
    }
    vec![Effect::Broadcast(ChatEvent::notice(
        Color::Green,
        format!("{} {}", nick, action),
    ))]
}

fn help_command(argument: &str) -> Vec<Effect> {
    let wanted = argument.trim().to_lowercase();
    if wanted.is_empty() {
        return vec![Effect::Reply(ChatEvent::direct(Color::Green, MSG_HELP))];
    }
    match COMMANDS.iter().find(|spec| spec.name == wanted) {
        Some(spec) => vec![Effect::Reply(ChatEvent::direct(
            Color::Green,
            spec.description,
        ))],
        None => vec![reply_error(MSG_UNKNOWN_COMMAND)],
    }
}
