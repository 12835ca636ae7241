use serde::Serialize;

/// Checkout modal visibility. Confirming also clears the cart, see [`crate::Session::confirm_checkout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Checkout {
    #[default]
    Hidden,
    Visible,
}

impl Checkout {
    /// Opening with an empty cart is fine, the modal just shows a zero total.
    #[must_use]
    pub fn open(self) -> Self {
        Checkout::Visible
    }

    #[must_use]
    pub fn close(self) -> Self {
        Checkout::Hidden
    }

    pub fn is_visible(self) -> bool {
        self == Checkout::Visible
    }
}
