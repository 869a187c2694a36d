use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shopdesk", version, about = "Catalog administration from the terminal")]
pub struct Cli {
    /// API base URL (overrides SHOPDESK_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// End the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Navigate to a route path and show where the guard lands
    Open { path: String },
    /// Catalog counts
    Dashboard,
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage sub-categories
    #[command(name = "sub-categories")]
    SubCategories {
        #[command(subcommand)]
        action: SubCategoryAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    List {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    Create {
        name: String,
        #[arg(long)]
        inactive: bool,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete { id: i64 },
    /// Storefront categories
    Public,
}

#[derive(Subcommand, Debug)]
pub enum SubCategoryAction {
    List {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        category: Option<i64>,
    },
    Create {
        #[arg(long)]
        category: i64,
        name: String,
        #[arg(long)]
        inactive: bool,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Update {
        id: i64,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ProductAction {
    List {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        sub_category: Option<i64>,
        #[arg(long)]
        page: Option<u32>,
    },
    Create {
        #[arg(long)]
        sub_category: i64,
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        inactive: bool,
        #[arg(long)]
        thumbnail: Option<PathBuf>,
    },
    Update {
        id: i64,
        #[arg(long)]
        sub_category: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        thumbnail: Option<PathBuf>,
    },
    Delete { id: i64 },
    /// Storefront products of a sub-category
    BySubCategory { sub_category: i64 },
    /// Storefront product detail
    Show { id: i64 },
}
