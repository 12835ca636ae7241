use order::{Cart, CartLine, Checkout, Menu, MenuState, Session};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub item_id: String,
    pub name: String,
    pub price: u32,
    pub qty: u32,
    pub subtotal: u64,
}

impl From<&CartLine> for LineView {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item().id.clone(),
            name: line.item().name.clone(),
            price: line.item().price,
            qty: line.qty(),
            subtotal: line.subtotal(),
        }
    }
}

#[derive(Serialize)]
pub struct CartView {
    pub lines: Vec<LineView>,
    pub total: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(LineView::from).collect(),
            total: cart.total(),
        }
    }
}

#[derive(Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub cart: CartView,
    pub checkout: Checkout,
}

impl SessionView {
    pub fn new(id: Uuid, session: &Session) -> Self {
        Self {
            id,
            cart: CartView::from(session.cart()),
            checkout: session.checkout(),
        }
    }
}

/// Confirm response. `receipt` is what was ordered, absent when the modal was not open.
#[derive(Serialize)]
pub struct ConfirmView {
    #[serde(flatten)]
    pub session: SessionView,
    pub receipt: Option<CartView>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuStatus {
    Loading,
    Ready,
}

#[derive(Serialize)]
pub struct MenuView {
    pub status: MenuStatus,
    pub items: Menu,
}

impl From<MenuState> for MenuView {
    fn from(state: MenuState) -> Self {
        match state {
            MenuState::Loading => Self {
                status: MenuStatus::Loading,
                items: Menu::default(),
            },
            MenuState::Ready(items) => Self {
                status: MenuStatus::Ready,
                items,
            },
        }
    }
}
