#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    Week,
    #[default]
    Month,
    Year,
    All,
}
