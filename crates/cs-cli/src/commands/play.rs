use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use cs_core::{CharacterClass, CoreError, Direction, Language};
use cs_game::{Command, Game, GameConfig, Screen, Skill};
use cs_mechanics::{CombatAction, CombatPhase};

use super::styled;

/// Longest stretch of game time one command may fast-forward through.
const SETTLE_LIMIT_MS: u64 = 10_000;

/// Default for a bare `wait`.
const DEFAULT_WAIT_MS: u64 = 1000;

/// One line of REPL input.
#[derive(Debug, PartialEq)]
enum Input {
    Game(Command),
    Wait(u64),
    Status,
    Help,
    Quit,
}

pub fn run(data_dir: &Path, seed: u64, no_encounters: bool) -> Result<(), String> {
    let mut config = GameConfig::default().with_seed(seed);
    if no_encounters {
        config = config.without_encounters();
    }
    let loading_ms = config.loading_ms;
    let mut game = Game::new(config, Box::new(cs_core::FileStore::new(data_dir)));

    println!("  {} Celestial Sword", "Loading".bold());
    game.settle(loading_ms);
    if game.has_restored_save() {
        println!(
            "  Saved game found for {}. Type 'continue' to resume.",
            game.player().name.bold()
        );
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    print_screen(&game);

    let mut marks = (game.chat().posted(), game.combat_log().posted());
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let screen = game.screen();
        let inventory_open = game.is_inventory_open();
        tracing::debug!(input, %screen, "repl input");
        match parse(input, screen) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => print_help(screen),
            Ok(Input::Status) => print_status(&game),
            Ok(Input::Wait(ms)) => game.advance(ms),
            Ok(Input::Game(command)) => {
                let saving = command == Command::Save;
                match game.dispatch(command) {
                    Ok(()) => {
                        if saving {
                            println!("  {}", "Game saved.".green());
                        }
                        game.settle(SETTLE_LIMIT_MS);
                    }
                    Err(e) => println!("  {}", e.to_string().yellow()),
                }
            }
            Err(e) => println!("  {}", e.yellow()),
        }

        for message in game.combat_log().since(marks.1) {
            println!("  {}", styled(message));
        }
        for message in game.chat().since(marks.0) {
            println!("  {}", styled(message));
        }
        marks = (game.chat().posted(), game.combat_log().posted());

        if game.screen() != screen {
            println!();
            print_screen(&game);
        } else if game.screen() == Screen::Combat || game.is_inventory_open() != inventory_open {
            print_status(&game);
        }
    }

    if game.save().map_err(|e| format!("failed to save: {e}"))? {
        println!("  Progress saved to {}", data_dir.display());
    }
    Ok(())
}

fn parse(input: &str, screen: Screen) -> Result<Input, String> {
    let (word, rest) = input
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((input, ""));

    let command = match word.to_lowercase().as_str() {
        "help" | "?" => return Ok(Input::Help),
        "quit" | "q" | "exit" => return Ok(Input::Quit),
        "status" | "look" => return Ok(Input::Status),
        "wait" => {
            let ms = if rest.is_empty() {
                DEFAULT_WAIT_MS
            } else {
                rest.parse()
                    .map_err(|_| format!("'{rest}' is not a number of milliseconds"))?
            };
            return Ok(Input::Wait(ms));
        }
        "new" => Command::NewGame,
        "continue" => Command::Continue,
        "settings" if screen == Screen::World => Command::OpenSettings,
        "settings" => Command::MenuSettings,
        "lang" | "language" => {
            Command::SetLanguage(rest.parse().map_err(|e: CoreError| e.to_string())?)
        }
        "class" => Command::SelectClass(
            rest.parse::<CharacterClass>()
                .map_err(|e: CoreError| e.to_string())?,
        ),
        "create" => Command::CreateCharacter {
            name: rest.to_string(),
        },
        "up" | "north" => Command::Move(Direction::Up),
        "down" | "south" => Command::Move(Direction::Down),
        "left" | "west" => Command::Move(Direction::Left),
        "right" | "east" => Command::Move(Direction::Right),
        "inventory" | "inv" => Command::ToggleInventory,
        "esc" => Command::CloseInventory,
        "quests" => Command::OpenQuests,
        "map" => Command::OpenMap,
        "say" => Command::SendChat(rest.to_string()),
        "skill" => {
            let slot = rest.chars().next().and_then(Skill::from_slot);
            Command::UseSkill(slot.ok_or_else(|| "usage: skill <1-4>".to_string())?)
        }
        "attack" => Command::Combat(CombatAction::Attack),
        "defend" => Command::Combat(CombatAction::Defend),
        "heal" => Command::Combat(CombatAction::Heal),
        "flee" | "run" => Command::Combat(CombatAction::Flee),
        "save" => Command::Save,
        _ => Command::from_key(word, screen)
            .ok_or_else(|| format!("unknown command '{word}' (type 'help')"))?,
    };
    Ok(Input::Game(command))
}

fn print_screen(game: &Game) {
    match game.screen() {
        Screen::Loading => println!("  Loading..."),
        Screen::MainMenu => {
            println!("  {}", "Celestial Sword".bold());
            println!("  new | continue | settings | lang <en|km>");
        }
        Screen::CharacterCreation => {
            println!("  {}", "Create your character".bold());
            println!(
                "  Selected: {} {}",
                game.preview_icon(),
                game.selected_class()
            );
            println!("  class <warrior|mage|archer> | create <name>");
        }
        Screen::World => {
            print_status(game);
            println!("  w/a/s/d to move, 1-4 skills, i inventory, say <text>, save");
        }
        Screen::Combat => {
            print_status(game);
            println!("  1 attack | 2 defend | 3 heal | 4 flee");
        }
    }
}

fn print_status(game: &Game) {
    let p = game.player();
    if !p.is_named() {
        println!("  No character yet.");
        return;
    }
    println!(
        "  {} {}  Lv {}  HP {}/{}  MP {}/{}  XP {}  at ({}, {})",
        p.name.bold(),
        p.class.icon(),
        p.level,
        p.health,
        p.max_health,
        p.mana,
        p.max_mana,
        p.experience,
        p.position.x,
        p.position.y,
    );

    if let Some(enemy) = game.combat().enemy() {
        let turn = match game.combat().phase() {
            CombatPhase::PlayerTurn => "your turn",
            CombatPhase::ResolvingEnemyTurn(_) => "enemy turn",
            CombatPhase::Ended(_) | CombatPhase::Idle => "over",
        };
        println!(
            "  {} {}  HP {}/{} ({}%)  {}",
            enemy.sprite,
            enemy.name.red().bold(),
            enemy.health,
            enemy.max_health,
            enemy.health_percent(),
            turn.dimmed(),
        );
    }

    if game.is_inventory_open() {
        let slots: Vec<&str> = game
            .inventory()
            .slots()
            .map(|slot| slot.unwrap_or("·"))
            .collect();
        for row in slots.chunks(6) {
            println!("  {}", row.join(" "));
        }
    }

    if game.language() != Language::En {
        println!("  {}", format!("language: {}", game.language()).dimmed());
    }
}

fn print_help(screen: Screen) {
    println!("  Anywhere: status, wait [ms], help, quit");
    match screen {
        Screen::Loading | Screen::MainMenu => {
            println!("  Menu: new, continue, settings, lang <en|km>");
        }
        Screen::CharacterCreation => {
            println!("  Creation: class <warrior|mage|archer>, create <name>");
        }
        Screen::World => {
            println!("  Move: w/a/s/d, up/down/left/right");
            println!("  Skills: 1-4 or skill <n>");
            println!("  Panels: i (inventory), esc, quests, map, settings");
            println!("  Chat: say <text>    Save: save");
        }
        Screen::Combat => {
            println!("  Combat: 1/attack, 2/defend, 3/heal, 4/flee");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_and_keys() {
        assert_eq!(
            parse("create Kael the Brave", Screen::CharacterCreation),
            Ok(Input::Game(Command::CreateCharacter {
                name: "Kael the Brave".to_string()
            }))
        );
        assert_eq!(
            parse("W", Screen::World),
            Ok(Input::Game(Command::Move(Direction::Up)))
        );
        assert_eq!(
            parse("3", Screen::Combat),
            Ok(Input::Game(Command::Combat(CombatAction::Heal)))
        );
        assert_eq!(
            parse("3", Screen::World),
            Ok(Input::Game(Command::UseSkill(Skill::Heal)))
        );
        assert_eq!(parse("wait 2500", Screen::World), Ok(Input::Wait(2500)));
        assert_eq!(parse("wait", Screen::World), Ok(Input::Wait(1000)));
    }

    #[test]
    fn settings_depends_on_screen() {
        assert_eq!(
            parse("settings", Screen::MainMenu),
            Ok(Input::Game(Command::MenuSettings))
        );
        assert_eq!(
            parse("settings", Screen::World),
            Ok(Input::Game(Command::OpenSettings))
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse("dance", Screen::World).is_err());
        assert!(parse("class rogue", Screen::CharacterCreation).is_err());
        assert!(parse("wait soon", Screen::World).is_err());
        assert!(parse("skill", Screen::World).is_err());
    }
}
