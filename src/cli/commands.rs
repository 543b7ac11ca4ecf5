use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "signaldesk",
    about = "Reconciliation and ranking core of the options evaluation dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconciled per-symbol rows (universe merged with the latest decision run)
    Rows,
    /// Top opportunities under the default band/risk/capital/score ranking
    Top {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Sortable opportunities table with persisted per-view preferences
    Opportunities {
        /// View key the sort/filter preferences persist under
        #[arg(long, default_value = "main")]
        view: String,
        /// Band filter (A, B, C)
        #[arg(long)]
        band: Option<String>,
        /// Strategy filter (exact match)
        #[arg(long)]
        strategy: Option<String>,
        /// Risk filter (OK, WARN, BLOCKED, UNKNOWN)
        #[arg(long)]
        risk: Option<String>,
        /// Capital ceiling in percent (rows with unknown capital are kept)
        #[arg(long)]
        max_cap: Option<f64>,
        /// Column to sort by; repeating the same column toggles direction
        #[arg(long)]
        sort: Option<String>,
    },
    /// Grouped notifications (Today / This week / Older)
    Notifications {
        /// Include notifications already marked read
        #[arg(long)]
        all: bool,
    },
    /// Pull alerts and validation warnings into the notification ledger
    Sync,
    /// Mark one notification read
    MarkRead {
        /// Notification ID
        id: String,
    },
    /// Mark every pending notification read
    MarkAllRead,
    /// Show or reset persisted table preferences
    Prefs {
        #[arg(long, default_value = "main")]
        view: String,
        #[arg(long)]
        reset: bool,
    },
}
