//! Live game-state directory: actors, users, and the current player.
//!
//! Injected into the grouping pass as a read-only lookup so tests can
//! substitute a hand-built roster for the host's directories.

use crate::message::{ChatMessage, Speaker};

/// A character in the game world.
#[derive(Clone, Debug)]
pub struct Actor {
    pub id: String,
    pub name: String,
    /// Token id when this actor is placed on the scene.
    pub token: Option<String>,
    /// Portrait image shown next to the actor's messages.
    pub image: Option<String>,
}

/// A connected player account.
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
}

/// Read-only directory of actors and users for one session.
#[derive(Default)]
pub struct GameRoster {
    actors: Vec<Actor>,
    users: Vec<User>,
    current_user: String,
}

impl GameRoster {
    pub fn new(current_user: impl Into<String>) -> Self {
        Self {
            actors: Vec::new(),
            users: Vec::new(),
            current_user: current_user.into(),
        }
    }

    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Id of the player this pass runs for.
    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    /// Whether the message was authored by the current player.
    pub fn is_self(&self, msg: &ChatMessage) -> bool {
        msg.user == self.current_user
    }

    /// Resolve the actor behind a speaker descriptor: placed token first,
    /// then actor id, then an alias scan over the directory.
    pub fn resolve_actor(&self, speaker: &Speaker) -> Option<&Actor> {
        if let Some(token) = speaker.token.as_deref() {
            if let Some(actor) = self.actors.iter().find(|a| a.token.as_deref() == Some(token)) {
                return Some(actor);
            }
        }
        if let Some(id) = speaker.actor.as_deref() {
            if let Some(actor) = self.actors.iter().find(|a| a.id == id) {
                return Some(actor);
            }
        }
        let alias = speaker.alias.as_deref()?;
        self.actors.iter().find(|a| a.name == alias)
    }

    pub fn resolve_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Display name for a user id, falling back to the raw id.
    pub fn user_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.resolve_user(id).map(|u| u.name.as_str()).unwrap_or(id)
    }

    /// Avatar for a message: actor portrait when a speaker resolves, else the
    /// author's account avatar. An unresolved speaker is never an error.
    pub fn avatar_for(&self, msg: &ChatMessage) -> Option<String> {
        if let Some(actor) = self.resolve_actor(&msg.speaker) {
            if let Some(image) = actor.image.as_ref() {
                return Some(image.clone());
            }
        }
        self.resolve_user(&msg.user).and_then(|u| u.avatar.clone())
    }
}
