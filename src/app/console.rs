use crate::app::commands::{self, Command};
use crate::app::replies::{self, Reply};
use crate::core::booking::{Actor, BookingEngine};
use crate::domain::model::ShowKind;
use crate::domain::ports::{Clock, ConfigProvider, Storage};
use crate::utils::error::{BookingError, Result};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const TOP_WRESTLERS: usize = 5;
const BOT_SUFFIX: &str = "[bot]";

/// Settings the session needs from whichever config source was loaded.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub prefix: String,
    pub default_guild: String,
    pub default_user: String,
    pub admins: Vec<String>,
    pub booker_role: Option<String>,
    pub logo_dir: Option<String>,
}

impl SessionSettings {
    pub fn from_provider(provider: &impl ConfigProvider) -> Self {
        Self {
            prefix: provider.command_prefix().to_string(),
            default_guild: provider.default_guild().to_string(),
            default_user: provider.default_user().to_string(),
            admins: provider.admins().to_vec(),
            booker_role: provider.booker_role().map(str::to_string),
            logo_dir: provider.logo_dir().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub guild_id: String,
    pub author_id: String,
    pub author_is_bot: bool,
    pub content: String,
}

pub struct ConsoleSession<S: Storage, C: Clock> {
    engine: BookingEngine<S, C>,
    settings: SessionSettings,
}

impl<S: Storage, C: Clock> ConsoleSession<S, C> {
    pub fn new(engine: BookingEngine<S, C>, settings: SessionSettings) -> Self {
        Self { engine, settings }
    }

    pub fn engine(&self) -> &BookingEngine<S, C> {
        &self.engine
    }

    /// `alice: !pick Sting` is sent as alice; a bare line as the default user.
    pub fn parse_line(&self, line: &str) -> Message {
        let line = line.trim();

        let (author, content) = match line.split_once(": ") {
            Some((author, content))
                if !author.is_empty()
                    && !author.contains(char::is_whitespace)
                    && !author.starts_with(&self.settings.prefix) =>
            {
                (author, content.trim())
            }
            _ => (self.settings.default_user.as_str(), line),
        };

        Message {
            guild_id: self.settings.default_guild.clone(),
            author_id: author.to_string(),
            author_is_bot: author.ends_with(BOT_SUFFIX),
            content: content.to_string(),
        }
    }

    pub async fn handle_line(&self, line: &str) -> Vec<Reply> {
        let message = self.parse_line(line);
        self.handle_message(&message).await
    }

    pub async fn handle_message(&self, message: &Message) -> Vec<Reply> {
        if message.author_is_bot {
            return Vec::new();
        }

        let command = match commands::parse(&message.content, &self.settings.prefix) {
            Ok(Some(command)) => command,
            Ok(None) => return Vec::new(),
            Err(e) => return vec![self.report(message, e)],
        };

        tracing::debug!(author = %message.author_id, "Command: {:?}", command);

        match self.dispatch(message, command).await {
            Ok(replies) => replies,
            Err(e) => vec![self.report(message, e)],
        }
    }

    fn report(&self, message: &Message, error: BookingError) -> Reply {
        if error.is_user_error() {
            tracing::warn!(author = %message.author_id, "Command rejected: {}", error);
        } else {
            tracing::error!(author = %message.author_id, "Command failed: {}", error);
        }
        replies::error(error.user_message())
    }

    fn actor(&self, message: &Message) -> Actor {
        let actor = Actor::new(message.guild_id.clone(), message.author_id.clone());
        if self.settings.admins.iter().any(|a| a == &message.author_id) {
            actor.admin()
        } else {
            actor
        }
    }

    async fn logo_for(&self, user_id: &str) -> Option<String> {
        let dir = self.settings.logo_dir.as_deref()?;
        let path = Path::new(dir).join(format!("{}.png", user_id));
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(path.to_string_lossy().into_owned()),
            _ => None,
        }
    }

    async fn dispatch(&self, message: &Message, command: Command) -> Result<Vec<Reply>> {
        let actor = self.actor(message);
        let engine = &self.engine;
        let booker_role = self.settings.booker_role.as_deref();

        let out = match command {
            Command::CreateFed { name } => {
                let logo = self.logo_for(&actor.user_id).await;
                vec![replies::federation_created(
                    &engine.create_federation(&actor, &name, logo).await?,
                )]
            }
            Command::ResetFed { target } => {
                let target = target.unwrap_or_else(|| actor.user_id.clone());
                let summary = engine.reset_federation(&actor, &target).await?;
                vec![replies::federation_reset(&summary, &target)]
            }
            Command::Pick { wrestler } => {
                vec![replies::wrestler_drafted(&engine.pick(&actor, &wrestler).await?)]
            }
            Command::Roster => vec![replies::roster(&engine.federation(&actor).await?)],
            Command::ShowEnd => {
                let show = engine.open_show(&actor, ShowKind::Ordinary, None).await?;
                replies::show_opened(&show, booker_role)
            }
            Command::Ple { title } => {
                let show = engine.open_show(&actor, ShowKind::Premium, title).await?;
                replies::show_opened(&show, booker_role)
            }
            Command::Vote {
                owner,
                show_number,
                choice,
            } => {
                let owner = owner.unwrap_or_else(|| actor.user_id.clone());
                let outcome = engine.vote(&actor, &owner, show_number, choice).await?;
                vec![replies::vote_recorded(&outcome)]
            }
            Command::Finalize { show_number } => {
                vec![replies::show_finalized(
                    &engine.finalize(&actor, show_number).await?,
                )]
            }
            Command::CreateBelt { name } => {
                vec![replies::belt_created(&engine.create_belt(&actor, &name).await?)]
            }
            Command::SetChamp { belt, champion } => {
                vec![replies::champion_set(
                    &engine.set_champion(&actor, &belt, &champion).await?,
                )]
            }
            Command::Vacate { belt } => {
                vec![replies::title_vacated(&engine.vacate(&actor, &belt).await?)]
            }
            Command::Defend { belt } => {
                vec![replies::title_defended(&engine.defend(&actor, &belt).await?)]
            }
            Command::Match { winners, losers } => {
                vec![replies::match_recorded(
                    &engine.record_match(&actor, &winners, &losers).await?,
                )]
            }
            Command::Fed => {
                let stats = engine.federation_stats(&actor).await?;
                vec![replies::federation_stats(&stats, &actor.user_id)]
            }
            Command::Rating => vec![replies::tv_rating(&engine.tv_rating(&actor).await?)],
            Command::Rankings => vec![replies::rankings(&engine.rankings(&actor.guild_id).await?)],
            Command::Top => vec![replies::top_wrestlers(
                &engine.top_wrestlers(&actor.guild_id, TOP_WRESTLERS).await,
            )],
            Command::Help => vec![replies::help()],
        };

        Ok(out)
    }

    /// Reads one message per line until EOF and writes every reply.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(
            "🤼 Console session started (guild: {}, prefix: {})",
            self.settings.default_guild,
            self.settings.prefix
        );

        let mut lines = reader.lines();
        let mut handled = 0usize;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            for reply in self.handle_line(&line).await {
                writer.write_all(reply.render().as_bytes()).await?;
                writer.write_all(b"\n").await?;
            }
            writer.flush().await?;
            handled += 1;
        }

        tracing::info!("Console session ended after {} messages", handled);
        Ok(())
    }
}
