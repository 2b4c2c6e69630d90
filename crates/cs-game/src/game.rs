//! The top-level game object.
//!
//! `Game` owns every piece of session state and the scheduler that replaces
//! browser timers. Commands mutate state synchronously; deferred effects
//! (enemy replies, result screens, bot answers, autosave, idle encounter
//! checks) run when the host advances the clock.

use rand::SeedableRng;
use rand::rngs::StdRng;

use cs_core::{
    CharacterClass, Inventory, KeyValueStore, Language, MessageKind, MessageLog, PlayerState,
    Snapshot,
};
use cs_mechanics::{
    Combat, CombatCommand, CombatEvent, CombatStep, Deferred, Scheduler, reduce,
};

use crate::command::Command;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::screen::Screen;

/// A deferred effect waiting on the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTask {
    /// Leave the loading screen.
    FinishLoading,
    /// Feed a deferred combat effect back into the state machine.
    Combat(Deferred),
    /// Answer a chat line.
    BotReply,
    /// Periodic snapshot.
    AutoSave,
    /// Periodic idle encounter roll.
    EncounterCheck,
}

/// An interactive RPG session.
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) player: PlayerState,
    pub(crate) inventory: Inventory,
    pub(crate) language: Language,
    pub(crate) screen: Screen,
    pub(crate) selected_class: CharacterClass,
    pub(crate) inventory_open: bool,
    pub(crate) combat: Combat,
    pub(crate) scheduler: Scheduler<GameTask>,
    pub(crate) chat: MessageLog,
    pub(crate) combat_log: MessageLog,
    pub(crate) rng: StdRng,
    store: Box<dyn KeyValueStore>,
    restored: bool,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("screen", &self.screen)
            .field("player", &self.player.name)
            .field("in_combat", &self.combat.is_active())
            .field("now", &self.scheduler.now())
            .finish()
    }
}

impl Game {
    /// Start a session, restoring any snapshot found in `store`.
    pub fn new(config: GameConfig, store: Box<dyn KeyValueStore>) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let mut scheduler = Scheduler::new();
        scheduler.schedule(config.loading_ms, GameTask::FinishLoading);
        scheduler.schedule_every(config.autosave_interval_ms, GameTask::AutoSave);
        scheduler.schedule_every(config.encounter_interval_ms, GameTask::EncounterCheck);

        let snapshot = Snapshot::load(&*store);
        let restored = snapshot.as_ref().is_some_and(|s| s.player.is_named());
        let snapshot = snapshot.unwrap_or_default();
        if restored {
            tracing::info!(player = %snapshot.player.name, "saved game restored");
        }

        Self {
            chat: MessageLog::new(config.max_log_lines),
            combat_log: MessageLog::new(config.max_log_lines),
            config,
            selected_class: snapshot.player.class,
            player: snapshot.player,
            inventory: snapshot.inventory,
            language: snapshot.language,
            screen: Screen::Loading,
            inventory_open: false,
            combat: Combat::new(),
            scheduler,
            rng,
            store,
            restored,
        }
    }

    /// The session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Player attributes.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The player's items.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Display language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The visible screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The combat slot.
    pub fn combat(&self) -> &Combat {
        &self.combat
    }

    /// Whether a combat session exists.
    pub fn is_in_combat(&self) -> bool {
        self.combat.is_active()
    }

    /// Chat and system messages.
    pub fn chat(&self) -> &MessageLog {
        &self.chat
    }

    /// Combat narration.
    pub fn combat_log(&self) -> &MessageLog {
        &self.combat_log
    }

    /// Whether the inventory panel is shown.
    pub fn is_inventory_open(&self) -> bool {
        self.inventory_open
    }

    /// Whether start-up found a saved character.
    pub fn has_restored_save(&self) -> bool {
        self.restored
    }

    /// Logical clock in milliseconds.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Apply one command.
    ///
    /// Commands that do not fit the current screen or combat phase are
    /// ignored. Only validation and storage failures return an error.
    pub fn dispatch(&mut self, command: Command) -> GameResult<()> {
        match command {
            Command::SetLanguage(language) => {
                self.language = language;
                Ok(())
            }
            Command::NewGame => {
                if self.screen == Screen::MainMenu {
                    self.screen = Screen::CharacterCreation;
                }
                Ok(())
            }
            Command::Continue => {
                self.do_continue();
                Ok(())
            }
            Command::MenuSettings => {
                self.post_system("Settings coming soon!");
                Ok(())
            }
            Command::SelectClass(class) => {
                self.select_class(class);
                Ok(())
            }
            Command::CreateCharacter { name } => self.create_character(&name),
            Command::Move(direction) => {
                self.move_player(direction);
                Ok(())
            }
            Command::UseSkill(skill) => {
                self.use_skill(skill);
                Ok(())
            }
            Command::ToggleInventory => {
                if self.screen == Screen::World {
                    self.inventory_open = !self.inventory_open;
                }
                Ok(())
            }
            Command::CloseInventory => {
                self.inventory_open = false;
                Ok(())
            }
            Command::OpenQuests => {
                self.post_world_notice("Quest system coming soon!");
                Ok(())
            }
            Command::OpenMap => {
                self.post_world_notice("World map coming soon!");
                Ok(())
            }
            Command::OpenSettings => {
                self.post_world_notice("Settings panel coming soon!");
                Ok(())
            }
            Command::SendChat(text) => {
                self.send_chat(&text);
                Ok(())
            }
            Command::Combat(action) => {
                self.run_combat(CombatCommand::Act(action));
                Ok(())
            }
            Command::Save => self.save().map(|_| ()),
        }
    }

    /// Advance the clock by `ms`, running every task that falls due.
    pub fn advance(&mut self, ms: u64) {
        let deadline = self.scheduler.now().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(deadline) {
            self.run_task(task);
        }
        self.scheduler.advance_to(deadline);
    }

    /// Advance until no one-shot task is pending (periodic tasks keep
    /// running as time passes). Gives up after `max_ms`.
    pub fn settle(&mut self, max_ms: u64) {
        let limit = self.scheduler.now().saturating_add(max_ms);
        while let Some(due) = self.scheduler.next_one_shot_due() {
            if due > limit {
                break;
            }
            let now = self.scheduler.now();
            self.advance(due.saturating_sub(now));
        }
    }

    /// Write the snapshot if a character exists. Returns whether it was written.
    pub fn save(&mut self) -> GameResult<bool> {
        if !self.player.is_named() {
            return Ok(false);
        }
        self.snapshot().write(&mut *self.store)?;
        Ok(true)
    }

    /// The state a save would write.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.clone(),
            inventory: self.inventory.clone(),
            language: self.language,
        }
    }

    fn run_task(&mut self, task: GameTask) {
        match task {
            GameTask::FinishLoading => {
                if self.screen == Screen::Loading {
                    self.screen = Screen::MainMenu;
                }
            }
            GameTask::Combat(deferred) => self.run_combat(CombatCommand::Resolve(deferred)),
            GameTask::BotReply => self.bot_reply(),
            GameTask::AutoSave => {
                if let Err(e) = self.save() {
                    tracing::warn!(error = %e, "autosave failed");
                }
            }
            GameTask::EncounterCheck => self.idle_encounter_check(),
        }
    }

    fn do_continue(&mut self) {
        if self.screen != Screen::MainMenu {
            return;
        }
        if self.restored && self.player.is_named() {
            self.screen = Screen::World;
        } else {
            self.post_system("No saved game found!");
        }
    }

    /// Run a combat command and apply its consequences to screens and logs.
    pub(crate) fn run_combat(&mut self, command: CombatCommand) {
        let step = reduce(&mut self.combat, &mut self.player, command, &mut self.rng);
        self.apply_combat_step(step);
    }

    fn apply_combat_step(&mut self, step: CombatStep) {
        let started = !step.ignored
            && step
                .events
                .iter()
                .any(|e| matches!(e, CombatEvent::Appeared { .. }));
        if started {
            self.inventory_open = false;
            self.screen = Screen::Combat;
        }
        for event in &step.events {
            self.combat_log.post(MessageKind::Combat, event.to_string());
        }
        if let Some((deferred, delay)) = step.deferred {
            self.scheduler.schedule(delay, GameTask::Combat(deferred));
        }
        if step.closed.is_some() {
            self.screen = Screen::World;
        }
    }

    pub(crate) fn post_system(&mut self, text: &str) {
        self.chat.post(MessageKind::System, text);
    }

    fn post_world_notice(&mut self, text: &str) {
        if self.screen == Screen::World {
            self.post_system(text);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cs_core::{Direction, FileStore, MemoryStore, SAVE_KEY};
    use cs_mechanics::{CombatAction, CombatPhase};

    pub(crate) fn quiet() -> GameConfig {
        GameConfig::default().without_encounters()
    }

    pub(crate) fn new_game() -> Game {
        Game::new(quiet(), Box::new(MemoryStore::new()))
    }

    /// A game in the world with a freshly created warrior.
    pub(crate) fn in_world() -> Game {
        let mut game = new_game();
        game.advance(3000);
        game.dispatch(Command::NewGame).unwrap();
        game.dispatch(Command::CreateCharacter {
            name: "Kael".to_string(),
        })
        .unwrap();
        game
    }

    #[test]
    fn loading_then_main_menu() {
        let mut game = new_game();
        assert_eq!(game.screen(), Screen::Loading);
        game.advance(2999);
        assert_eq!(game.screen(), Screen::Loading);
        game.advance(1);
        assert_eq!(game.screen(), Screen::MainMenu);
    }

    #[test]
    fn continue_without_save() {
        let mut game = new_game();
        game.advance(3000);
        game.dispatch(Command::Continue).unwrap();
        assert_eq!(game.screen(), Screen::MainMenu);
        assert!(game.chat().contains_text("No saved game found!"));
    }

    #[test]
    fn autosave_every_thirty_seconds_once_named() {
        let store = MemoryStore::new();
        let mut game = Game::new(quiet(), Box::new(store));
        game.advance(30_000);
        assert_eq!(game.store.get(SAVE_KEY).unwrap(), None);

        game.dispatch(Command::NewGame).unwrap();
        game.dispatch(Command::CreateCharacter {
            name: "Kael".to_string(),
        })
        .unwrap();
        game.advance(29_999);
        assert_eq!(game.store.get(SAVE_KEY).unwrap(), None);
        game.advance(1);
        let saved = game.store.get(SAVE_KEY).unwrap().unwrap();
        assert_eq!(Snapshot::parse(&saved), Some(game.snapshot()));
    }

    #[test]
    fn save_on_demand() {
        let mut game = new_game();
        assert!(!game.save().unwrap());
        let mut game = in_world();
        assert!(game.save().unwrap());
        game.dispatch(Command::Save).unwrap();
    }

    #[test]
    fn restores_snapshot_on_start() {
        let mut store = MemoryStore::new();
        let mut snapshot = Snapshot::default();
        snapshot.player.name = "Mira".to_string();
        snapshot.player.class = CharacterClass::Archer;
        snapshot.player.experience = 310;
        snapshot.inventory.reset_to(CharacterClass::Archer.starting_items());
        snapshot.language = Language::Km;
        snapshot.write(&mut store).unwrap();

        let mut game = Game::new(quiet(), Box::new(store));
        assert!(game.has_restored_save());
        assert_eq!(game.snapshot(), snapshot);

        game.advance(3000);
        game.dispatch(Command::Continue).unwrap();
        assert_eq!(game.screen(), Screen::World);
    }

    #[test]
    fn progress_survives_restart_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = Game::new(quiet(), Box::new(FileStore::new(dir.path())));
        game.advance(3000);
        game.dispatch(Command::NewGame).unwrap();
        game.dispatch(Command::SelectClass(CharacterClass::Mage))
            .unwrap();
        game.dispatch(Command::CreateCharacter {
            name: "Sokha".to_string(),
        })
        .unwrap();
        game.dispatch(Command::Move(Direction::Left)).unwrap();
        game.dispatch(Command::Save).unwrap();

        let restored = Game::new(quiet(), Box::new(FileStore::new(dir.path())));
        assert!(restored.has_restored_save());
        assert_eq!(restored.player().name, "Sokha");
        assert_eq!(restored.player().position.x, -20);
        assert_eq!(restored.inventory().items()[0], "🔮");
    }

    #[test]
    fn corrupt_snapshot_starts_fresh() {
        let mut store = MemoryStore::new();
        store.set(SAVE_KEY, "{\"player\": 12").unwrap();
        let game = Game::new(quiet(), Box::new(store));
        assert!(!game.has_restored_save());
        assert_eq!(game.player(), &PlayerState::default());
        assert!(game.inventory().is_empty());
    }

    #[test]
    fn full_fight_through_the_clock() {
        let mut game = in_world();
        game.run_combat(CombatCommand::Start(cs_core::enemy::spawn(1)));
        assert_eq!(game.screen(), Screen::Combat);
        assert!(game.combat_log().contains_text("A wild Ancient Spirit appears!"));

        for _ in 0..40 {
            if !game.is_in_combat() {
                break;
            }
            if game.combat().is_players_turn() {
                game.dispatch(Command::Combat(CombatAction::Attack)).unwrap();
            }
            game.advance(1000);
        }
        assert!(!game.is_in_combat());
        assert_eq!(game.combat().phase(), CombatPhase::Idle);
        assert_eq!(game.screen(), Screen::World);
        assert!(game.player().experience >= 25);
    }

    #[test]
    fn starting_combat_switches_screen() {
        let mut game = in_world();
        game.dispatch(Command::ToggleInventory).unwrap();
        game.run_combat(CombatCommand::Start(cs_core::enemy::spawn(0)));
        assert_eq!(game.screen(), Screen::Combat);
        assert!(!game.is_inventory_open());

        game.run_combat(CombatCommand::Start(cs_core::enemy::spawn(2)));
        assert_eq!(game.combat().enemy().unwrap().name, "Forest Bandit");
        assert_eq!(game.screen(), Screen::Combat);
    }

    #[test]
    fn enemy_reply_waits_for_clock() {
        let mut game = in_world();
        game.run_combat(CombatCommand::Start(cs_core::enemy::spawn(3)));
        game.dispatch(Command::Combat(CombatAction::Defend)).unwrap();
        assert!(!game.combat().is_players_turn());
        assert_eq!(game.player().health, 100);

        game.advance(999);
        assert_eq!(game.player().health, 100);
        game.advance(1);
        assert!(game.player().health < 100);
        assert!(game.combat().is_players_turn());
    }

    #[test]
    fn debug_output_is_compact() {
        let game = new_game();
        let debug = format!("{game:?}");
        assert!(debug.contains("Loading"));
    }
}
