use colored::Colorize;

use cs_web::RegistrationForm;

use super::{WebOptions, block_on, open_session, styled};

pub fn login(
    options: WebOptions<'_>,
    identifier: &str,
    password: &str,
    remember: bool,
) -> Result<(), String> {
    let mut session = open_session(&options);
    let user = block_on(session.login(identifier, password, remember))?.map_err(|e| e.to_string())?;

    if let Some(message) = session.notifications().last() {
        println!("  {}", styled(message));
    }
    println!("  Level {} on {}", user.level, user.server);
    if !remember {
        println!("  {}", "Session not remembered; it ends with this command.".dimmed());
    }
    Ok(())
}

pub fn register(options: WebOptions<'_>, form: &RegistrationForm) -> Result<(), String> {
    let mut session = open_session(&options);
    let message = block_on(session.register(form))?.map_err(|e| e.to_string())?;
    println!("  {}", message.green());
    Ok(())
}

pub fn logout(options: WebOptions<'_>) -> Result<(), String> {
    let mut session = open_session(&options);
    session.logout().map_err(|e| e.to_string())?;
    if let Some(message) = session.notifications().last() {
        println!("  {}", styled(message));
    }
    Ok(())
}

pub fn whoami(options: WebOptions<'_>) -> Result<(), String> {
    let mut session = open_session(&options);
    match block_on(session.restore())?.map_err(|e| e.to_string())? {
        Some(user) => {
            println!("  {} ({})", user.username.bold(), user.email);
            println!("  Level {} on {}", user.level, user.server);
        }
        None => println!("  Not logged in."),
    }
    Ok(())
}
