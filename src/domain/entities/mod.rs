pub mod merged_row;
pub mod notification;
pub mod opportunity;
pub mod snapshots;
