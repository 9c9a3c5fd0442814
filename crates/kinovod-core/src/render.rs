//! MSX menu rendering
//!
//! Turns a validated link list into the fixed menu JSON the MSX
//! frontend consumes. The Russian literals below are contract values:
//! the UI parses the `icon` and the `action` prefix conventions, and
//! operators read the sentinel texts verbatim.

use crate::types::{Menu, MenuItem, MenuTemplate, QualityLabel};

/// Render the menu for a list of validated manifest links
///
/// One item per link, titled `"{title} - {quality}"` with a
/// `video:{link}` action. An empty list renders exactly one sentinel
/// "not found" item. The headline count reflects the final item list,
/// sentinel included — an empty result reads `"(1 потоков)"`, which is
/// what the historical service shipped and the UI expects.
pub fn render_menu(links: &[String], title: &str) -> Menu {
    let mut items: Vec<MenuItem> = links
        .iter()
        .map(|link| {
            let label = format!("{} - {}", title, QualityLabel::classify(link));
            MenuItem {
                title: label.clone(),
                player_label: label,
                action: format!("video:{}", link),
                icon: "movie".to_string(),
            }
        })
        .collect();

    if items.is_empty() {
        items.push(not_found_item());
    }

    Menu {
        kind: "pages".to_string(),
        headline: format!("{} ({} потоков)", title, items.len()),
        template: Some(MenuTemplate::default()),
        items,
    }
}

/// The fixed sentinel item shown when no streams were found
fn not_found_item() -> MenuItem {
    MenuItem {
        title: "Видео не найдено".to_string(),
        player_label: "Попробуйте позже".to_string(),
        action: "info:Не удалось найти видеопотоки".to_string(),
        icon: "warning".to_string(),
    }
}

/// Render the error menu for an unexpected handler failure
///
/// The failure message lands in the item `action` as `info:{message}`,
/// so the UI can show the diagnostic text to the end user. No template
/// is attached.
pub fn render_error_menu(message: &str) -> Menu {
    Menu {
        kind: "pages".to_string(),
        headline: "Ошибка загрузки".to_string(),
        template: None,
        items: vec![MenuItem {
            title: "Ошибка сервера".to_string(),
            player_label: "Попробуйте позже".to_string(),
            action: format!("info:{}", message),
            icon: "warning".to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_two_links() {
        let links = vec![
            "https://x.com/video/master_1080.m3u8".to_string(),
            "https://x.com/video/720/index.m3u8".to_string(),
        ];

        let menu = render_menu(&links, "Gabriel");

        assert_eq!(menu.kind, "pages");
        assert_eq!(menu.headline, "Gabriel (2 потоков)");
        assert_eq!(menu.items.len(), 2);
        assert_eq!(menu.items[0].title, "Gabriel - 1080p");
        assert_eq!(menu.items[1].title, "Gabriel - 720p");
        assert_eq!(menu.items[0].action, "video:https://x.com/video/master_1080.m3u8");
        assert_eq!(menu.items[0].icon, "movie");
        assert!(menu.template.is_some());
    }

    #[test]
    fn test_items_follow_input_order() {
        let links = vec![
            "https://x.com/b/360.m3u8".to_string(),
            "https://x.com/a/master_1080.m3u8".to_string(),
        ];

        let menu = render_menu(&links, "Gabriel");
        assert_eq!(menu.items[0].title, "Gabriel - 360p");
        assert_eq!(menu.items[1].title, "Gabriel - 1080p");
    }

    #[test]
    fn test_empty_input_renders_exact_sentinel() {
        let menu = render_menu(&[], "Gabriel");

        assert_eq!(menu.items.len(), 1);
        let item = &menu.items[0];
        assert_eq!(item.title, "Видео не найдено");
        assert_eq!(item.player_label, "Попробуйте позже");
        assert_eq!(item.action, "info:Не удалось найти видеопотоки");
        assert_eq!(item.icon, "warning");
    }

    #[test]
    fn test_sentinel_counts_in_headline() {
        // Historical counting quirk, preserved on purpose
        let menu = render_menu(&[], "Gabriel");
        assert_eq!(menu.headline, "Gabriel (1 потоков)");
    }

    #[test]
    fn test_headline_count_matches_item_count() {
        for n in 1..5 {
            let links: Vec<String> = (0..n)
                .map(|i| format!("https://x.com/v{}/master.m3u8", i))
                .collect();
            let menu = render_menu(&links, "Gabriel");
            assert_eq!(menu.headline, format!("Gabriel ({} потоков)", menu.items.len()));
        }
    }

    #[test]
    fn test_error_menu_shape() {
        let menu = render_error_menu("browser launch failed");

        assert_eq!(menu.kind, "pages");
        assert_eq!(menu.headline, "Ошибка загрузки");
        assert!(menu.template.is_none());
        assert_eq!(menu.items.len(), 1);
        assert_eq!(menu.items[0].title, "Ошибка сервера");
        assert_eq!(menu.items[0].action, "info:browser launch failed");
        assert_eq!(menu.items[0].icon, "warning");
    }
}
