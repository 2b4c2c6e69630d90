use colored::Colorize;

use cs_web::SupportTicket;

use super::{WebOptions, block_on, open_session, styled};

pub fn run(options: WebOptions<'_>, ticket: &SupportTicket) -> Result<(), String> {
    let mut session = open_session(&options);
    let receipt =
        block_on(session.submit_support_ticket(ticket))?.map_err(|e| e.to_string())?;

    if let Some(message) = session.notifications().last() {
        println!("  {}", styled(message));
    }
    println!(
        "  Ticket {} received {}",
        receipt.id.to_string().bold(),
        receipt.received_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}
