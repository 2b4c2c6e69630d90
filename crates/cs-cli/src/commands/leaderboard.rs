use comfy_table::{ContentArrangement, Table};

use cs_web::{Board, LeaderboardTab, Leaderboards};

pub fn run(tab: &str, json: bool) -> Result<(), String> {
    let tab: LeaderboardTab = tab.parse().map_err(|e: cs_web::WebError| e.to_string())?;
    let mut boards = Leaderboards::new();
    boards.select(tab);

    if json {
        let value = match boards.board() {
            Board::Level(rows) => serde_json::to_string_pretty(rows),
            Board::Pvp(rows) => serde_json::to_string_pretty(rows),
            Board::Guild(rows) => serde_json::to_string_pretty(rows),
        }
        .map_err(|e| e.to_string())?;
        println!("{value}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    match boards.board() {
        Board::Level(rows) => {
            table.set_header(vec!["#", "Player", "Class", "Level", "Server"]);
            for (rank, row) in rows.iter().enumerate() {
                table.add_row(vec![
                    (rank + 1).to_string(),
                    row.player.clone(),
                    format!("{} {}", row.class.icon(), row.class),
                    row.level.to_string(),
                    row.server.clone(),
                ]);
            }
        }
        Board::Pvp(rows) => {
            table.set_header(vec!["#", "Player", "Rating", "W/L"]);
            for (rank, row) in rows.iter().enumerate() {
                table.add_row(vec![
                    (rank + 1).to_string(),
                    row.player.clone(),
                    row.rating.to_string(),
                    format!("{}/{}", row.wins, row.losses),
                ]);
            }
        }
        Board::Guild(rows) => {
            table.set_header(vec!["#", "Guild", "Leader", "Members", "Power"]);
            for (rank, row) in rows.iter().enumerate() {
                table.add_row(vec![
                    (rank + 1).to_string(),
                    row.guild.clone(),
                    row.leader.clone(),
                    row.members.to_string(),
                    row.power.to_string(),
                ]);
            }
        }
    }

    println!("{table}");
    println!();
    println!("  {} rankings", tab);
    Ok(())
}
