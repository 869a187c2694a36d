//! Plain-text tables and JSON output for command results.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use shopdesk_core::catalog::CatalogSummary;
use shopdesk_core::models::{Category, Page, PageMeta, Product, SubCategory, User};
use shopdesk_core::router::ResolvedRoute;
use shopdesk_core::utils::{format_date, format_optional, truncate_string};

/// Widest a name column is allowed to grow.
const NAME_WIDTH: usize = 32;

const DESCRIPTION_WIDTH: usize = 40;

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn message(&self, text: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "message": text }));
        } else {
            println!("{}", text);
        }
    }

    pub fn user(&self, user: &User) -> Result<()> {
        if self.json {
            return self.print_json(user);
        }
        println!("{}", user.display());
        println!("  id:     {}", user.id);
        println!("  avatar: {}", format_optional(user.avatar.as_deref(), "-"));
        Ok(())
    }

    pub fn route(&self, route: &ResolvedRoute) -> Result<()> {
        if self.json {
            return self.print_json(&serde_json::json!({
                "path": route.path,
                "name": route.name.map(|n| n.as_str()),
                "requires_auth": route.requires_auth,
                "redirected_from": route.redirected_from,
            }));
        }
        match &route.redirected_from {
            Some(from) => println!("{} -> {}", from, route.path),
            None => println!("{}", route.path),
        }
        Ok(())
    }

    pub fn summary(&self, summary: &CatalogSummary) -> Result<()> {
        if self.json {
            return self.print_json(summary);
        }
        println!("Categories:     {:>6}", summary.categories);
        println!("Sub-categories: {:>6}", summary.sub_categories);
        println!("Products:       {:>6}", summary.products);
        Ok(())
    }

    pub fn categories(&self, items: &[Category], meta: Option<&PageMeta>) -> Result<()> {
        if self.json {
            return self.print_json(items);
        }
        println!("{:>6}  {:<w$}  {:<8}  {}", "ID", "NAME", "STATUS", "UPDATED", w = NAME_WIDTH);
        for c in items {
            println!(
                "{:>6}  {:<w$}  {:<8}  {}",
                c.id,
                truncate_string(&c.name, NAME_WIDTH),
                c.status(),
                updated(c.updated_at.as_deref()),
                w = NAME_WIDTH,
            );
        }
        footer(items.len(), meta);
        Ok(())
    }

    pub fn sub_categories(&self, items: &[SubCategory]) -> Result<()> {
        if self.json {
            return self.print_json(items);
        }
        println!(
            "{:>6}  {:>8}  {:<w$}  {:<8}  {}",
            "ID", "CATEGORY", "NAME", "STATUS", "UPDATED",
            w = NAME_WIDTH
        );
        for s in items {
            println!(
                "{:>6}  {:>8}  {:<w$}  {:<8}  {}",
                s.id,
                s.category_id,
                truncate_string(&s.name, NAME_WIDTH),
                s.status(),
                updated(s.updated_at.as_deref()),
                w = NAME_WIDTH,
            );
        }
        footer(items.len(), None);
        Ok(())
    }

    pub fn products(&self, items: &[Product], meta: Option<&PageMeta>) -> Result<()> {
        if self.json {
            return self.print_json(items);
        }
        println!(
            "{:>6}  {:>7}  {:<w$}  {:<8}  {}",
            "ID", "SUB-CAT", "NAME", "STATUS", "DESCRIPTION",
            w = NAME_WIDTH
        );
        for p in items {
            println!(
                "{:>6}  {:>7}  {:<w$}  {:<8}  {}",
                p.id,
                p.sub_category_id,
                truncate_string(&p.name, NAME_WIDTH),
                p.status(),
                truncate_string(
                    &format_optional(p.description.as_deref(), "-"),
                    DESCRIPTION_WIDTH
                ),
                w = NAME_WIDTH,
            );
        }
        footer(items.len(), meta);
        Ok(())
    }

    pub fn product_detail(&self, product: &Product) -> Result<()> {
        if self.json {
            return self.print_json(product);
        }
        println!("{} (#{})", product.name, product.id);
        println!("  sub-category: {}", product.sub_category_id);
        println!("  status:       {}", product.status());
        println!("  thumbnail:    {}", format_optional(product.thumbnail_url.as_deref(), "-"));
        println!("  updated:      {}", updated(product.updated_at.as_deref()));
        if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
            println!();
            println!("{}", description);
        }
        Ok(())
    }

    /// Point at the next page when the listing was cut short
    pub fn page_hint<T>(&self, page: &Page<T>) {
        if self.json {
            return;
        }
        if let Some(hint) = next_page_hint(page) {
            println!("{}", hint);
        }
    }

    /// Deletion acknowledgements are printed as the server sent them in JSON mode.
    pub fn deleted(&self, kind: &str, id: i64, ack: &Value) -> Result<()> {
        if self.json {
            return self.print_json(ack);
        }
        match ack.get("message").and_then(Value::as_str) {
            Some(message) => println!("{} {} deleted: {}", kind, id, message),
            None => println!("{} {} deleted", kind, id),
        }
        Ok(())
    }
}

fn updated(date: Option<&str>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

fn next_page_hint<T>(page: &Page<T>) -> Option<String> {
    if !page.has_next() {
        return None;
    }
    let next = page.meta.as_ref()?.current_page + 1;
    Some(format!("More results available: rerun with --page {}", next))
}

fn footer(shown: usize, meta: Option<&PageMeta>) {
    match meta {
        Some(m) => println!(
            "\nPage {} of {} ({} shown, {} total)",
            m.current_page, m.last_page, shown, m.total
        ),
        None => println!("\n{} shown", shown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current_page: u64, last_page: u64) -> PageMeta {
        PageMeta {
            current_page,
            last_page,
            per_page: 10,
            total: last_page * 10,
        }
    }

    #[test]
    fn test_next_page_hint() {
        let page: Page<Category> = Page {
            items: vec![],
            meta: Some(meta(2, 3)),
        };
        assert_eq!(
            next_page_hint(&page).as_deref(),
            Some("More results available: rerun with --page 3")
        );
    }

    #[test]
    fn test_no_hint_on_last_or_unpaginated_page() {
        let last: Page<Category> = Page {
            items: vec![],
            meta: Some(meta(3, 3)),
        };
        let bare: Page<Category> = Page {
            items: vec![],
            meta: None,
        };
        assert_eq!(next_page_hint(&last), None);
        assert_eq!(next_page_hint(&bare), None);
    }

    #[test]
    fn test_updated_placeholder() {
        assert_eq!(updated(None), "-");
    }

    #[test]
    fn test_updated_formats_timestamp() {
        assert_eq!(updated(Some("2024-03-01T10:20:30Z")), format_date("2024-03-01T10:20:30Z"));
    }
}
