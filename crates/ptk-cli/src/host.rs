//! Terminal implementation of the workflow host.

use ptk_core::{Business, CategoriesFile, Incentive};
use ptk_workflow::{display_line, Notice, NoticeLevel, ResolvedIncentive, WorkflowHost};

/// Renders workflow callbacks to stdout and notices to stderr.
pub struct ConsoleHost {
    categories: CategoriesFile,
}

impl ConsoleHost {
    pub fn new(categories: CategoriesFile) -> ConsoleHost {
        ConsoleHost { categories }
    }
}

impl WorkflowHost for ConsoleHost {
    fn business_selected(&mut self, business: &Business) {
        let category = self.categories.label_for(&business.business_type);
        println!("\n{} [{category}]", business.name);
        if business.is_chain_parent {
            println!("  chain headquarters record");
        } else {
            println!("  {}", business.display_address());
        }
        if let Some(phone) = &business.phone {
            println!("  {phone}");
        }
        if let Some(chain_name) = &business.chain_name {
            println!("  part of the {chain_name} chain");
        }
    }

    fn incentives_resolved(&mut self, _business: &Business, incentives: &[ResolvedIncentive]) {
        for entry in incentives {
            println!("  [{}] {}", entry.scope, display_line(&entry.incentive));
        }
    }

    fn edit_loaded(&mut self, incentive: &Incentive) {
        println!("\nediting incentive {}:", incentive.id);
        println!("  {}", display_line(incentive));
    }

    fn notify(&mut self, notice: &Notice) {
        let prefix = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("{prefix}: {}", notice.message);
    }

    fn busy_changed(&mut self, busy: bool) {
        tracing::debug!(busy, "workflow busy state changed");
    }
}
