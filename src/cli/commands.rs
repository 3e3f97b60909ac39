use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::api::{NewSociety, Role, User};
use crate::app::init_config;
use crate::auth::SessionManager;

use super::{Commands, ReportFormat};

/// Handle CLI subcommands. Startup restoration has already completed by the
/// time this runs, so session state is resolved.
pub async fn handle_command(session: &mut SessionManager, command: &Commands) -> Result<()> {
    match command {
        Commands::Init => init_config(),
        Commands::Login {
            email,
            password,
            role,
        } => {
            let user = session.login(email, password, Role::from(*role)).await?;
            println!(
                "Signed in as {} ({})",
                user.email.green(),
                user.role.label()
            );
            Ok(())
        }
        Commands::Register {
            name,
            description,
            email,
            password,
            category,
            established_year,
        } => {
            let data = NewSociety {
                name: name.clone(),
                description: description.clone(),
                email: email.clone(),
                password: password.clone(),
                category: category.clone(),
                established_year: *established_year,
                contact_info: None,
            };
            let user = session.register(&data).await?;
            println!("Registered and signed in as {}", user.email.green());
            Ok(())
        }
        Commands::Whoami => {
            show_session(session);
            Ok(())
        }
        Commands::Logout => {
            session.logout();
            println!("Signed out.");
            Ok(())
        }
        Commands::Societies => list_societies(session).await,
        Commands::Members => list_members(session).await,
        Commands::Events => list_events(session).await,
        Commands::Announcements => list_announcements(session).await,
        Commands::Stats => show_stats(session).await,
        Commands::Activities { limit } => list_activities(session, *limit).await,
        Commands::Report {
            format,
            society,
            output,
        } => download_report(session, *format, society.as_deref(), output.clone()).await,
        Commands::Health => {
            let health = session.gateway().health_check().await?;
            println!(
                "Backend: {} (uptime {:.0}s, as of {})",
                health.status.green(),
                health.uptime,
                health.timestamp
            );
            Ok(())
        }
    }
}

fn show_session(session: &SessionManager) {
    match session.user() {
        Some(user) => {
            println!("Signed in as {}", user.email.green());
            if let Some(name) = &user.name {
                println!("  Name: {}", name);
            }
            println!("  Role: {}", user.role.label());
            println!("  Id:   {}", user.id);
        }
        None => println!("Not signed in."),
    }
}

/// Commands below need a resolved identity; fail with a hint otherwise.
fn current_user(session: &SessionManager) -> Result<&User> {
    session
        .user()
        .context("not signed in; run `atrium login` first")
}

async fn list_societies(session: &SessionManager) -> Result<()> {
    current_user(session)?;
    let societies = session.gateway().societies().await?;
    if societies.is_empty() {
        println!("No societies registered.");
        return Ok(());
    }
    println!("Societies ({}):", societies.len());
    for society in societies {
        let counts = format!(
            "{} members, {} events",
            society.total_members.or(society.member_count).unwrap_or(0),
            society.total_events.or(society.event_count).unwrap_or(0)
        );
        println!("  • {} <{}> — {}", society.name.cyan(), society.email, counts);
    }
    Ok(())
}

async fn list_members(session: &SessionManager) -> Result<()> {
    let user = current_user(session)?;
    let members = match user.role {
        Role::Admin => session.gateway().all_members().await?,
        Role::Society => session.gateway().members().await?,
    };
    if members.is_empty() {
        println!("No members found.");
        return Ok(());
    }
    println!("Members ({}):", members.len());
    for member in members {
        println!(
            "  • {} — {}, {} ({})",
            member.name.cyan(),
            member.designation,
            member.department,
            member.enrollment_no
        );
    }
    Ok(())
}

async fn list_events(session: &SessionManager) -> Result<()> {
    let user = current_user(session)?;
    let events = match user.role {
        Role::Admin => session.gateway().all_events().await?,
        Role::Society => session.gateway().events().await?,
    };
    if events.is_empty() {
        println!("No events found.");
        return Ok(());
    }
    println!("Events ({}):", events.len());
    for event in events {
        let status = event.status.as_deref().unwrap_or("Planned");
        println!(
            "  • {} on {} [{}] — {} participants",
            event.event_name.cyan(),
            event.day,
            status,
            event.members_participated.len()
        );
    }
    Ok(())
}

async fn list_announcements(session: &SessionManager) -> Result<()> {
    let user = current_user(session)?;
    let announcements = match user.role {
        Role::Admin => session.gateway().all_announcements().await?,
        Role::Society => session.gateway().announcements().await?,
    };
    if announcements.is_empty() {
        println!("No announcements.");
        return Ok(());
    }
    println!("Announcements ({}):", announcements.len());
    for announcement in announcements {
        let pin = if announcement.is_pinned.unwrap_or(false) {
            "[pinned] "
        } else {
            ""
        };
        let priority = announcement.priority.as_deref().unwrap_or("Medium");
        println!(
            "  • {}{} ({}) — {}",
            pin,
            announcement.title.cyan(),
            priority,
            announcement.created_at
        );
    }
    Ok(())
}

async fn show_stats(session: &SessionManager) -> Result<()> {
    let user = current_user(session)?;
    match user.role {
        Role::Admin => {
            let stats = session.gateway().admin_stats().await?;
            println!("Directory statistics:");
            println!("  Societies:     {}", stats.total_societies);
            println!("  Members:       {}", stats.total_members);
            println!("  Events:        {}", stats.total_events);
            println!("  Announcements: {}", stats.total_announcements);
            if let Some(active) = stats.active_societies {
                println!("  Active societies: {}", active);
            }
        }
        Role::Society => {
            let stats = session.gateway().society_stats().await?;
            println!("Society statistics:");
            println!("  Members: {}", stats.total_members);
            println!("  Events:  {}", stats.total_events);
            if let Some(upcoming) = stats.upcoming_events {
                println!("  Upcoming events: {}", upcoming);
            }
            for event in stats.recent_events.iter().take(3) {
                println!("  Recent: {} on {}", event.event_name, event.day);
            }
        }
    }
    Ok(())
}

async fn list_activities(session: &SessionManager, limit: Option<usize>) -> Result<()> {
    current_user(session)?;
    let activities = session.gateway().recent_activities(limit).await?;
    if activities.is_empty() {
        println!("No recorded activity.");
        return Ok(());
    }
    println!("Recent activity ({}):", activities.len());
    for entry in activities {
        let target = entry.target_name.as_deref().unwrap_or("-");
        println!(
            "  • {} {} {} ({})",
            entry.created_at,
            entry.action.cyan(),
            target,
            entry.target_type
        );
    }
    Ok(())
}

async fn download_report(
    session: &SessionManager,
    format: ReportFormat,
    society: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    current_user(session)?;
    let gateway = session.gateway();
    let bytes = match (format, society) {
        (ReportFormat::Excel, None) => gateway.excel_report(&[]).await?,
        (ReportFormat::Pdf, None) => gateway.pdf_report(&[]).await?,
        (ReportFormat::Excel, Some(id)) => gateway.society_excel_report(id).await?,
        (ReportFormat::Pdf, Some(id)) => gateway.society_pdf_report(id).await?,
    };

    let path = output.unwrap_or_else(|| PathBuf::from(report_filename(society, format)));
    std::fs::write(&path, &bytes)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    println!("Wrote {} ({} bytes)", path.display().to_string().green(), bytes.len());
    Ok(())
}

/// Derive the download filename the way the backend's web console names its
/// exports: non-alphanumerics collapsed to underscores, stamped with the
/// current date.
fn report_filename(society: Option<&str>, format: ReportFormat) -> String {
    let date = chrono::Utc::now().format("%Y-%m-%d");
    let extension = match format {
        ReportFormat::Excel => "xlsx",
        ReportFormat::Pdf => "pdf",
    };
    match society {
        Some(name) => {
            let name: String = name
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect();
            format!("{}_detailed_report_{}.{}", name, date, extension)
        }
        None => format!("societies_report_{}.{}", date, extension),
    }
}
