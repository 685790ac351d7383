/// The two bus announcements the progress tracker publishes, so overlays can
/// congratulate without polling group state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrophyEvent {
    GroupUnlocked { group_id: String, name: String },
    GroupCompleted { group_id: String, name: String },
}
