//! Application state and command dispatch for the shopdesk CLI.
//!
//! The `App` owns the session manager and the router for the lifetime of
//! the process; commands never reach the API without first passing the
//! navigation guard for their route.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};

use shopdesk_core::api::Upload;
use shopdesk_core::auth::AuthError;
use shopdesk_core::catalog::{
    CategoryDraft, CategoryFilter, CategoryPatch, ProductDraft, ProductFilter, ProductPatch,
    SubCategoryDraft, SubCategoryFilter, SubCategoryPatch,
};
use shopdesk_core::{ApiClient, ApiError, Config, RouteName, Router, SessionManager};

use crate::cli::{CategoryAction, Cli, Command, ProductAction, SubCategoryAction};
use crate::output::Output;

// ============================================================================
// Constants
// ============================================================================

const ENV_EMAIL: &str = "SHOPDESK_EMAIL";
const ENV_PASSWORD: &str = "SHOPDESK_PASSWORD";

/// Maximum length for email input.
const MAX_EMAIL_LENGTH: usize = 254;

pub struct App {
    config: Config,
    session: Arc<SessionManager>,
    router: Router,
    out: Output,
}

impl App {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Config::load_or_default();
        let api_url = cli.api_url.clone().unwrap_or_else(|| config.api_url());
        info!(api_url = %api_url, backend = ?config.token_backend(), "Config loaded");

        let tokens = config.token_store().context("Failed to open token store")?;
        let api = ApiClient::new(&api_url, tokens).context("Failed to build HTTP client")?;
        let session = Arc::new(SessionManager::new(api));
        let router = Router::admin(session.clone());

        Ok(Self {
            config,
            session,
            router,
            out: Output::new(cli.json),
        })
    }

    fn api(&self) -> &ApiClient {
        self.session.api()
    }

    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Login { email } => self.login(email).await,
            Command::Logout => {
                self.session.logout().await;
                self.out.message("Logged out");
                Ok(())
            }
            Command::Whoami => {
                match self.session.fetch_me().await {
                    Some(user) => self.out.user(&user)?,
                    None => self.out.message("Not logged in"),
                }
                Ok(())
            }
            Command::Open { path } => {
                let route = self.router.navigate(&path).await?;
                self.out.route(&route)?;
                Ok(())
            }
            Command::Dashboard => {
                self.enter(RouteName::Dashboard).await?;
                let summary = self.api().summary().await?;
                self.out.summary(&summary)
            }
            Command::Categories { action } => self.categories(action).await,
            Command::SubCategories { action } => self.sub_categories(action).await,
            Command::Products { action } => self.products(action).await,
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Navigate to a protected route, failing if the guard sends us to login
    async fn enter(&self, name: RouteName) -> Result<()> {
        let route = self.router.push(name).await?;
        if route.is(RouteName::Login) {
            bail!("Not logged in. Run `shopdesk login` first.");
        }
        Ok(())
    }

    async fn login(&mut self, email: Option<String>) -> Result<()> {
        // The guard sends a live session straight past the login page
        let route = self.router.push(RouteName::Login).await?;
        if !route.is(RouteName::Login) {
            if let Some(user) = self.session.current_user() {
                self.out.message(&format!("Already logged in as {}", user.display()));
            }
            return Ok(());
        }

        let email = match email
            .or_else(|| std::env::var(ENV_EMAIL).ok())
            .filter(|e| !e.is_empty())
        {
            Some(email) => email,
            None => Self::prompt_email(self.config.last_email.as_deref())?,
        };
        if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
            bail!("A valid email is required");
        }

        let password = match std::env::var(ENV_PASSWORD) {
            Ok(password) if !password.is_empty() => password,
            _ => rpassword::prompt_password("Password: ")?,
        };

        match self.session.login(&email, &password).await {
            Ok(user) => {
                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.out.message(&format!("Logged in as {}", user.display()));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                let user_message = match &e {
                    AuthError::InvalidCredentials(_) => "Invalid email or password".to_string(),
                    AuthError::Api(ApiError::NetworkError(err)) if err.is_timeout() => {
                        "Connection timed out. Please try again.".to_string()
                    }
                    AuthError::Api(ApiError::NetworkError(_)) => {
                        "Unable to connect to server. Check the API URL and your connection.".to_string()
                    }
                    other => format!("Login failed: {}", other),
                };
                bail!(user_message)
            }
        }
    }

    fn prompt_email(last: Option<&str>) -> Result<String> {
        match last {
            Some(last) => print!("Email [{}]: ", last),
            None => print!("Email: "),
        }
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        Ok(match (input.is_empty(), last) {
            (true, Some(last)) => last.to_string(),
            _ => input.to_string(),
        })
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    async fn categories(&self, action: CategoryAction) -> Result<()> {
        self.enter(RouteName::Category).await?;
        let categories = self.api().categories();

        match action {
            CategoryAction::List { q, page } => {
                let page = categories.list(&CategoryFilter { q, page }).await?;
                self.out.categories(&page.items, page.meta.as_ref())?;
                self.out.page_hint(&page);
                Ok(())
            }
            CategoryAction::Create { name, inactive, image } => {
                let draft = CategoryDraft {
                    name,
                    active: !inactive,
                    image: read_upload(image)?,
                };
                let category = categories.create(draft).await?;
                self.out.categories(std::slice::from_ref(&category), None)
            }
            CategoryAction::Update { id, name, active, image } => {
                let patch = CategoryPatch {
                    name,
                    active,
                    image: read_upload(image)?,
                };
                let category = categories.update(id, patch).await?;
                self.out.categories(std::slice::from_ref(&category), None)
            }
            CategoryAction::Delete { id } => {
                let ack = categories.delete(id).await?;
                self.out.deleted("Category", id, &ack)
            }
            CategoryAction::Public => {
                let list = categories.public().await?;
                self.out.categories(&list, None)
            }
        }
    }

    async fn sub_categories(&self, action: SubCategoryAction) -> Result<()> {
        self.enter(RouteName::SubCategory).await?;
        let sub_categories = self.api().sub_categories();

        match action {
            SubCategoryAction::List { q, category } => {
                let filter = SubCategoryFilter {
                    q,
                    category_id: category,
                };
                let page = sub_categories.list(&filter).await?;
                self.out.sub_categories(&page.items)
            }
            SubCategoryAction::Create { category, name, inactive, image } => {
                let draft = SubCategoryDraft {
                    category_id: category,
                    name,
                    active: !inactive,
                    image: read_upload(image)?,
                };
                let sub = sub_categories.create(draft).await?;
                self.out.sub_categories(std::slice::from_ref(&sub))
            }
            SubCategoryAction::Update { id, category, name, active, image } => {
                let patch = SubCategoryPatch {
                    category_id: category,
                    name,
                    active,
                    image: read_upload(image)?,
                };
                let sub = sub_categories.update(id, patch).await?;
                self.out.sub_categories(std::slice::from_ref(&sub))
            }
            SubCategoryAction::Delete { id } => {
                let ack = sub_categories.delete(id).await?;
                self.out.deleted("Sub-category", id, &ack)
            }
        }
    }

    async fn products(&self, action: ProductAction) -> Result<()> {
        self.enter(RouteName::Product).await?;
        let products = self.api().products();

        match action {
            ProductAction::List { q, sub_category, page } => {
                let filter = ProductFilter {
                    q,
                    sub_category_id: sub_category,
                    page,
                };
                let page = products.list(&filter).await?;
                self.out.products(&page.items, page.meta.as_ref())?;
                self.out.page_hint(&page);
                Ok(())
            }
            ProductAction::Create { sub_category, name, description, inactive, thumbnail } => {
                let draft = ProductDraft {
                    sub_category_id: sub_category,
                    name,
                    description,
                    active: !inactive,
                    thumbnail: read_upload(thumbnail)?,
                };
                let product = products.create(draft).await?;
                self.out.products(std::slice::from_ref(&product), None)
            }
            ProductAction::Update {
                id,
                sub_category,
                name,
                description,
                clear_description,
                active,
                thumbnail,
            } => {
                let description = if clear_description {
                    Some(None)
                } else {
                    description.map(Some)
                };
                let patch = ProductPatch {
                    sub_category_id: sub_category,
                    name,
                    description,
                    active,
                    thumbnail: read_upload(thumbnail)?,
                };
                let product = products.update(id, patch).await?;
                self.out.products(std::slice::from_ref(&product), None)
            }
            ProductAction::Delete { id } => {
                let ack = products.delete(id).await?;
                self.out.deleted("Product", id, &ack)
            }
            ProductAction::BySubCategory { sub_category } => {
                let list = products.by_sub_category(sub_category).await?;
                self.out.products(&list, None)
            }
            ProductAction::Show { id } => {
                let product = products.public(id).await?;
                self.out.product_detail(&product)
            }
        }
    }
}

fn read_upload(path: Option<PathBuf>) -> Result<Option<Upload>> {
    path.map(|p| {
        Upload::from_path(&p).with_context(|| format!("Failed to read {}", p.display()))
    })
    .transpose()
}
