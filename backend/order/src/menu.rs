//! # Menu
//!
//! Menu items as served by microCMS, plus the built-in table.
//!
//! ## Schema
//! - id (**string**), unique across the menu
//! - name (**string**)
//! - price (**int**), yen, no decimals
//! - comment (**string**, optional)
//! - image (**url**, **width**, **height**, optional)
//!
//! Extra CMS fields such as `createdAt` or `revisedAt` are ignored.
use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MenuImage>,
}

impl MenuItem {
    pub fn new(id: &str, name: &str, price: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            comment: None,
            image: None,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_image(mut self, url: &str, width: u32, height: u32) -> Self {
        self.image = Some(MenuImage {
            url: url.to_string(),
            width,
            height,
        });
        self
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}円", self.name, self.price)
    }
}

/// Ordered list of items. Order is whatever the source gave us.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Menu {
    items: Vec<Arc<MenuItem>>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items: items.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn items(&self) -> &[Arc<MenuItem>] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&Arc<MenuItem>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<MenuItem>> for Menu {
    fn from(items: Vec<MenuItem>) -> Self {
        Self::new(items)
    }
}

/// Built-in menu, used when `MENU_SOURCE=static`.
pub fn static_menu() -> Menu {
    Menu::new(vec![
        MenuItem::new("momo", "モモ", 180)
            .with_comment("肉や野菜が入った蒸し餃子。")
            .with_image("/momo.jpg", 259, 194),
        MenuItem::new("yomari", "ヨマリ", 130)
            .with_comment("ゴマと黒糖入りの甘い蒸し餃子。")
            .with_image("/yomari.jpg", 259, 194),
        MenuItem::new("sausage", "ソーセージ", 159)
            .with_comment("ソース付きのグリルソーセージ。")
            .with_image("/sausage.jpg", 201, 251),
        MenuItem::new("panipuri", "パニプリ", 100)
            .with_comment("スパイシーな水とポテトが入った空洞のプーリ。")
            .with_image("/panipuri.jpg", 275, 183),
        MenuItem::new("samosa", "サモサ", 100)
            .with_comment("スパイスの効いたポテト入りのサクサクパイ。")
            .with_image("/samosa.jpg", 247, 204),
        MenuItem::new("selroti", "セルロティ", 100)
            .with_comment("ネパールの伝統的な米粉ドーナツ。")
            .with_image("/selroti.jpg", 259, 194),
        MenuItem::new("chatpat", "チャトパット", 90)
            .with_comment("スパイシーで酸味のあるストリートスナック。")
            .with_image("/chatpat.jpg", 258, 195),
        MenuItem::new("papdichat", "パパディチャット", 90)
            .with_comment("パリパリのパパドとスパイシーな具材。")
            .with_image("/Papdichat.jpg", 259, 194),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_menu_ids_unique() {
        let menu = static_menu();
        assert_eq!(menu.len(), 8);

        for (i, item) in menu.items().iter().enumerate() {
            assert!(
                menu.items()[i + 1..].iter().all(|other| other.id != item.id),
                "duplicate id {}",
                item.id
            );
        }
    }

    #[test]
    fn test_find() {
        let menu = static_menu();
        assert_eq!(menu.find("momo").map(|item| item.price), Some(180));
        assert!(menu.find("ramen").is_none());
    }

    #[test]
    fn test_cms_item_without_optionals() {
        let item: MenuItem = serde_json::from_str(
            r#"{"id":"tea","name":"チヤ","price":80,"createdAt":"2025-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();

        assert_eq!(item, MenuItem::new("tea", "チヤ", 80));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = serde_json::from_str::<MenuItem>(r#"{"id":"x","name":"x","price":-1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(MenuItem::new("momo", "モモ", 180).to_string(), "モモ 180円");
    }
}
