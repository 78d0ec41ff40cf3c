use crate::search::NavKey;

/// Slip commands bound to control keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlipAction {
    AddLeg,
    CycleProp,
    RaiseThreshold,
    LowerThreshold,
    Reset,
    Price,
    ChangePlayer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Redraw,
    /// The input text changed.
    Edit(String),
    Navigate(NavKey),
    Focus,
    Outside,
    Hover(usize),
    Click(usize),
    Slip(SlipAction),
    Exit,
}
