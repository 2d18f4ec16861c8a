//! Audit log CLI command

use clap::Args;

use crate::audit::{AuditLogger, EntityType};
use crate::error::BudgetResult;

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of most recent records to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,

    /// Only show records for years, months or entries
    #[arg(short, long)]
    pub entity: Option<EntityType>,
}

pub fn handle_audit_command(logger: &AuditLogger, args: AuditArgs) -> BudgetResult<()> {
    let entries = logger.read_recent(args.count, args.entity)?;
    if entries.is_empty() {
        println!("No audit records.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.summary());
    }
    Ok(())
}
