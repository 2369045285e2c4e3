mod args;
mod print;

use std::{fs, path::PathBuf};

use anyhow::{bail, Context};
use args::genres::GenreList;
use clap::{Parser, Subcommand};
use log::info;
use novelhub_core::{
    catalog::{Ranking, SearchQuery, TitleOrder},
    prelude::*,
    validate::{CreateUserForm, RegisterForm},
};
use novelhub_engine::{App, FavoriteToggle, ProfileUpdate, Session, UserEdit};
use novelhub_persist::{Config, DEFAULT_CONFIG_PATH};
use novelhub_store::HttpStore;
use simplelog::{LevelFilter, TermLogger};
use url::Url;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Provide additional information (default only shows errors).
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// The config file to read
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Base url of the data store, overrides the config file
    #[arg(long)]
    store: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Login {
        user_name: String,

        #[arg(short, long)]
        password: String,
    },

    Logout,

    /// Create a reader account
    Register {
        user_name: String,

        email: String,

        #[arg(short, long)]
        password: String,

        /// Must match the password
        #[arg(short, long)]
        confirm: String,
    },

    /// Show the logged in user
    Whoami,

    /// Edit the logged in user's profile
    Profile {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        avatar: Option<String>,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Check whether the session may open a route
    Route { path: String },

    /// Search the catalog
    Novels {
        /// Matched against titles and descriptions
        query: Option<String>,

        #[arg(short, long)]
        genre: Option<String>,

        /// Only novels in the user's favorites
        #[arg(short, long)]
        favorites: bool,
    },

    Genres,

    /// Show a novel and its chapters
    Novel { id: String },

    /// Read a chapter
    Chapter { id: String },

    /// Add or remove a novel from favorites
    Favorite { novel_id: String },

    Unfavorite { novel_id: String },

    Favorites,

    Leaderboard {
        /// views, rating or chapters
        #[arg(short, long, default_value = "views")]
        by: Ranking,
    },

    #[command(subcommand)]
    Manager(ManagerCommand),

    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
enum ManagerCommand {
    CreateNovel {
        title: String,

        #[arg(short, long, default_value = "")]
        author: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Cover image link
        #[arg(short, long)]
        cover: Option<String>,

        /// Comma separated (ex: Fantasy, Drama)
        #[arg(short, long)]
        genres: Option<GenreList>,

        #[arg(short, long, default_value = "0")]
        rating: f32,

        #[arg(short, long, default_value = "ongoing")]
        status: NovelStatus,
    },

    UpdateNovel {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        cover: Option<String>,

        #[arg(short, long)]
        genres: Option<GenreList>,

        #[arg(short, long)]
        rating: Option<f32>,

        #[arg(short, long)]
        status: Option<NovelStatus>,
    },

    DeleteNovel { id: String },

    AddChapter {
        novel_id: String,

        number: u32,

        title: String,

        /// Chapter text
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,

        /// Read the chapter text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Rebuild a novel's chapter links from chapter numbers
    Relink { novel_id: String },

    List {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        genre: Option<String>,

        /// title, rating-asc or rating-desc
        #[arg(short, long, default_value = "title")]
        order: TitleOrder,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    Users {
        /// Matched against names and emails
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        role: Option<Role>,
    },

    CreateUser {
        user_name: String,

        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(short, long)]
        role: Option<Role>,
    },

    EditUser {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        role: Option<Role>,

        /// Left unchanged when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    DeleteUser { id: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = Config::open(&cli.config)
        .with_context(|| format!("failed to read config '{}'", cli.config.display()))?;
    if let Some(url) = cli.store {
        config.store_url = url.to_string();
    }

    let store = HttpStore::new(&config.store_url)?;
    let session = Session::load(config.session_path.clone())?;
    info!("using store at {}", store.base());

    let mut app = App::new(store, session).with_sync_favorites(config.sync_favorites);

    match cli.command {
        Commands::Login { user_name, password } => {
            let user = app.login(&user_name, &password)?;
            println!("Logged in as {} ({})", user.user_name, user.role);
            println!("Home: {}", app.home_route());
        }
        Commands::Logout => {
            app.logout()?;
            println!("Logged out");
        }
        Commands::Register {
            user_name,
            email,
            password,
            confirm,
        } => {
            let form = RegisterForm {
                user_name,
                email,
                password,
                confirm_password: confirm,
            };
            let user = app.register(&form)?;
            println!("Registered {}, you can now log in", user.user_name);
        }
        Commands::Whoami => match app.current_user() {
            Some(user) => {
                print::user_row(user);
                println!("avatar: {}", user.avatar_url(""));
                println!("favorites: {}", user.favorites.join(", "));
                println!("home: {}", app.home_route());
            }
            None => {
                println!("Not logged in");
                if let Some(pending) = app.session().pending_favorite() {
                    println!("pending favorite: {pending}");
                }
            }
        },
        Commands::Profile {
            name,
            email,
            avatar,
            password,
        } => {
            let Some(current) = app.current_user() else {
                bail!("log in to edit your profile");
            };
            let update = ProfileUpdate {
                user_name: name.unwrap_or_else(|| current.user_name.clone()),
                email,
                avatar,
                password,
            };
            let user = app.update_profile(update)?;
            print::user_row(&user);
        }
        Commands::Route { path } => match app.guard(&path) {
            Access::Allow => println!("allow"),
            Access::RedirectToLogin => println!("redirect to {}", novelhub_core::policy::LOGIN_ROUTE),
            Access::Forbidden { required } => {
                let roles = required.iter().map(Role::as_str).collect::<Vec<_>>();
                println!("forbidden (requires {})", roles.join(" or "));
            }
        },
        Commands::Novels {
            query,
            genre,
            favorites,
        } => {
            let query = SearchQuery {
                text: query,
                genre,
                favorites_only: favorites,
            };
            for novel in app.search(&query)? {
                print::novel_row(&novel);
            }
        }
        Commands::Genres => {
            for genre in app.genres()? {
                println!("{genre}");
            }
        }
        Commands::Novel { id } => {
            let detail = app.novel(&id)?;
            print::novel_detail(&detail);
        }
        Commands::Chapter { id } => {
            let view = app.read_chapter(&id)?;
            print::chapter(&view);
        }
        Commands::Favorite { novel_id } => match app.toggle_favorite(&novel_id)? {
            FavoriteToggle::Added => println!("Added {novel_id} to favorites"),
            FavoriteToggle::Removed => println!("Removed {novel_id} from favorites"),
            FavoriteToggle::LoginRequired => {
                println!("Log in to favorite {novel_id}, it will be added when you do")
            }
        },
        Commands::Unfavorite { novel_id } => {
            if app.remove_favorite(&novel_id)? {
                println!("Removed {novel_id} from favorites");
            } else {
                println!("{novel_id} is not a favorite");
            }
        }
        Commands::Favorites => {
            for novel in app.favorites()? {
                print::novel_row(&novel);
            }
        }
        Commands::Leaderboard { by } => {
            for (rank, standing) in app.leaderboard(by)?.iter().enumerate() {
                println!(
                    "{:>3}. {:<32} {:>8} views {:>5} chapters {:>4.1}",
                    rank + 1,
                    standing.novel.title,
                    standing.views,
                    standing.chapters,
                    standing.novel.rating
                );
            }
        }
        Commands::Manager(command) => manager(&mut app, command)?,
        Commands::Admin(command) => admin(&mut app, command)?,
    }

    Ok(())
}

fn manager(app: &mut App<HttpStore>, command: ManagerCommand) -> anyhow::Result<()> {
    match command {
        ManagerCommand::CreateNovel {
            title,
            author,
            description,
            cover,
            genres,
            rating,
            status,
        } => {
            app.require("/manager/create-novel")?;

            let mut novel = Novel::new(title, author);
            novel.description = description;
            novel.cover = cover;
            novel.genres = genres.map(|g| g.0).unwrap_or_default();
            novel.rating = rating;
            novel.status = status;

            let novel = app.create_novel(novel)?;
            println!("Created {} ({})", novel.title, novel.id);
        }
        ManagerCommand::UpdateNovel {
            id,
            title,
            author,
            description,
            cover,
            genres,
            rating,
            status,
        } => {
            app.require("/manager/update-novel")?;

            let mut novel = app.novel(&id)?.novel;
            if let Some(title) = title {
                novel.title = title;
            }
            if let Some(author) = author {
                novel.author = author;
            }
            if let Some(description) = description {
                novel.description = description;
            }
            if let Some(cover) = cover {
                novel.cover = Some(cover);
            }
            if let Some(genres) = genres {
                novel.genres = genres.0;
            }
            if let Some(rating) = rating {
                novel.rating = rating;
            }
            if let Some(status) = status {
                novel.status = status;
            }

            let novel = app.update_novel(novel)?;
            println!("Updated {} ({})", novel.title, novel.id);
        }
        ManagerCommand::DeleteNovel { id } => {
            app.require("/manager/delete-novel")?;
            app.delete_novel(&id)?;
            println!("Deleted {id}");
        }
        ManagerCommand::AddChapter {
            novel_id,
            number,
            title,
            content,
            file,
        } => {
            app.require("/manager/create-chapter")?;

            let content = match (content, file) {
                (Some(content), _) => content,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read '{}'", path.display()))?,
                (None, None) => String::new(),
            };

            let draft = NewChapter {
                number,
                title,
                content,
            };
            let chapter = app.create_chapter(&novel_id, draft)?;
            println!(
                "Created chapter {} ({}) after {}",
                chapter.chapter_number,
                chapter.id,
                chapter.previous.as_deref().unwrap_or("nothing")
            );
        }
        ManagerCommand::Relink { novel_id } => {
            app.require("/manager/relink")?;
            let patched = app.relink(&novel_id)?;
            if patched.is_empty() {
                println!("Links already match chapter numbers");
            } else {
                println!("Patched {}", patched.join(", "));
            }
        }
        ManagerCommand::List { name, genre, order } => {
            app.require("/manager/dashboard")?;
            for novel in app.manager_novels(name.as_deref(), genre.as_deref(), order)? {
                print::novel_row(&novel);
            }
        }
    }

    Ok(())
}

fn admin(app: &mut App<HttpStore>, command: AdminCommand) -> anyhow::Result<()> {
    match command {
        AdminCommand::Users { search, role } => {
            app.require("/admin/users")?;
            for user in app.users(search.as_deref(), role)? {
                print::user_row(&user);
            }
        }
        AdminCommand::CreateUser {
            user_name,
            email,
            password,
            role,
        } => {
            app.require("/admin/create-user")?;
            let form = CreateUserForm {
                user_name,
                email,
                password,
                role,
            };
            let user = app.create_user(&form)?;
            print::user_row(&user);
        }
        AdminCommand::EditUser {
            id,
            name,
            email,
            role,
            password,
        } => {
            app.require("/admin/users")?;

            let Some(current) = app.users(None, None)?.into_iter().find(|u| u.id == id) else {
                bail!("no user with id '{id}'");
            };
            let edit = UserEdit {
                user_name: name.unwrap_or(current.user_name),
                email: email.unwrap_or(current.email),
                role: role.unwrap_or(current.role),
                password,
            };
            let user = app.edit_user(&id, edit)?;
            print::user_row(&user);
        }
        AdminCommand::DeleteUser { id } => {
            app.require("/admin/users")?;
            app.delete_user(&id)?;
            println!("Deleted {id}");
        }
    }

    Ok(())
}
