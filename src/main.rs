mod api;
mod chat;
mod config;
mod models;
mod state;

use api::{ListQuery, PropertiesClient, PropertySource};
use chat::transcript::{confirmation, Sender, FALLBACK};
use chat::{refine_query, DeepSeekClient, RefineError, Transcript};
use config::Config;
use models::Property;
use state::{page_window, FavoriteStore, Favorites, ListState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Page size used when pulling the catalog for the favorites view,
/// mirroring the larger startup fetch the listing site uses.
const CATALOG_LIMIT: u32 = 100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Home Search");
    info!("==============");

    let config = Config::load();

    let source = PropertiesClient::new(&config.api_base_url)?;
    let assistant = match &config.deepseek_api_key {
        Some(key) => Some(DeepSeekClient::new(&config.deepseek_url, key)?),
        None => {
            warn!("DEEPSEEK_API_KEY not set; the chat assistant is disabled");
            None
        }
    };

    let mut favorites = Favorites::load(FavoriteStore::new(config.favorites_path.clone()));
    let mut list = ListState::new(config.page_size);
    let mut transcript = Transcript::new();

    list.refresh(&source).await;
    render_list(&list, &favorites);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "next" => {
                list.next_page();
                list.refresh(&source).await;
                render_list(&list, &favorites);
            }
            "prev" => {
                list.prev_page();
                list.refresh(&source).await;
                render_list(&list, &favorites);
            }
            "page" => match rest.parse::<u32>() {
                Ok(n) => {
                    list.set_page(n);
                    list.refresh(&source).await;
                    render_list(&list, &favorites);
                }
                Err(_) => println!("Usage: page <number>"),
            },
            "search" => {
                list.set_search_term(rest);
                list.refresh(&source).await;
                render_list(&list, &favorites);
            }
            "fav" => {
                if rest.is_empty() {
                    println!("Usage: fav <id>");
                } else if favorites.toggle(rest) {
                    println!("Added {rest} to favorites");
                } else {
                    println!("Removed {rest} from favorites");
                }
            }
            "favorites" => {
                render_favorites(&source, &favorites).await;
            }
            "chat" => {
                if rest.is_empty() {
                    println!("Usage: chat <message>");
                } else {
                    handle_chat(
                        rest,
                        assistant.as_ref(),
                        &mut transcript,
                        &mut list,
                        &source,
                        &favorites,
                    )
                    .await;
                }
            }
            _ => {
                // Anything else is a manual search, like typing into
                // the search bar.
                list.set_search_term(line);
                list.refresh(&source).await;
                render_list(&list, &favorites);
            }
        }
    }

    info!("Goodbye!");
    Ok(())
}

/// Run one chat turn: forward the message to the assistant, and on a
/// successful refinement make it the active search term and re-query.
async fn handle_chat(
    text: &str,
    assistant: Option<&DeepSeekClient>,
    transcript: &mut Transcript,
    list: &mut ListState,
    source: &dyn PropertySource,
    favorites: &Favorites,
) {
    transcript.push_user(text);

    let Some(assistant) = assistant else {
        transcript.push_bot("The assistant is offline (no API key configured).");
        render_transcript(transcript);
        return;
    };

    if !transcript.begin_send() {
        println!("(the assistant is still thinking, your message was added to the chat)");
        render_transcript(transcript);
        return;
    }

    match refine_query(assistant, text).await {
        Ok(refined) => {
            transcript.push_bot(confirmation(&refined));
            list.set_search_term(refined);
            list.refresh(source).await;
            transcript.finish_send();
            render_transcript(transcript);
            render_list(list, favorites);
        }
        Err(RefineError::Rejected) => {
            transcript.push_bot(FALLBACK);
            transcript.finish_send();
            render_transcript(transcript);
        }
        Err(RefineError::Transport(e)) => {
            warn!("Assistant request failed: {:#}", e);
            transcript.push_bot(FALLBACK);
            transcript.finish_send();
            render_transcript(transcript);
        }
    }
}

fn render_list(list: &ListState, favorites: &Favorites) {
    println!();
    if let Some(error) = list.error() {
        println!("⚠️  {error}");
        return;
    }

    if !list.search_term().is_empty() {
        println!("Results for \"{}\":", list.search_term());
    }

    if list.properties().is_empty() {
        println!("No properties found.");
    }

    for (i, property) in list.properties().iter().enumerate() {
        render_card(i, property, favorites);
    }

    if let Some(window) = page_window(list.page(), list.total_pages()) {
        let strip: Vec<String> = window
            .pages
            .iter()
            .map(|&n| {
                if n == list.page() {
                    format!("({n})")
                } else {
                    format!("[{n}]")
                }
            })
            .collect();
        let prev = if window.prev_enabled { "← prev" } else { "      " };
        let next = if window.next_enabled { "next →" } else { "" };
        println!(
            "Page {} of {}   {} {} {}",
            list.page(),
            list.total_pages(),
            prev,
            strip.join(" "),
            next
        );
    }

    if let Some(fetched_at) = list.fetched_at() {
        println!("(fetched at {})", fetched_at.format("%H:%M:%S"));
    }
}

fn render_card(index: usize, property: &Property, favorites: &Favorites) {
    let id = property.identifier();
    let star = if favorites.contains(&id) { "★" } else { " " };
    println!("{} {}. {} ({})", star, index + 1, property.address, property.price);
    println!(
        "     {} | {} | {} | {}",
        property.bedrooms, property.bathrooms, property.area, property.property_type
    );
    if let Some(link) = &property.link {
        println!("     Listing: {link}");
    }
    if let Some(map_link) = &property.map_link {
        println!("     Map: {map_link}");
    }
    println!("     ID: {id}");
    println!();
}

/// Fetch a large slice of the catalog and show only the favorited
/// properties, the way the listing site builds its favorites page.
async fn render_favorites(source: &dyn PropertySource, favorites: &Favorites) {
    println!();
    if favorites.is_empty() {
        println!("You haven't added any properties to your favorites yet.");
        return;
    }

    let query = ListQuery::new(1, CATALOG_LIMIT, "");
    match source.fetch_page(&query).await {
        Ok(page) => {
            let mut shown = 0;
            for (i, property) in page
                .properties
                .iter()
                .filter(|p| favorites.contains(&p.identifier()))
                .enumerate()
            {
                render_card(i, property, favorites);
                shown += 1;
            }
            if shown == 0 {
                println!(
                    "None of your {} favorite(s) are in the current catalog: {}",
                    favorites.len(),
                    favorites.ids().collect::<Vec<_>>().join(", ")
                );
            }
        }
        Err(e) => {
            warn!("Favorites fetch failed: {:#}", e);
            println!("⚠️  {}", state::list::FETCH_ERROR);
        }
    }
}

fn render_transcript(transcript: &Transcript) {
    println!();
    for message in transcript.messages() {
        match message.sender {
            Sender::User => println!("you> {}", message.text),
            Sender::Bot => println!("bot> {}", message.text),
        }
    }
    if transcript.is_pending() {
        println!("bot> ...");
    }
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  <text>           search properties (e.g. '3 bed dublin')");
    println!("  search <text>    same, explicit form");
    println!("  next / prev      change page");
    println!("  page <n>         jump to page n");
    println!("  fav <id>         toggle a favorite by property id");
    println!("  favorites        show favorited properties");
    println!("  chat <message>   ask the assistant to build a search for you");
    println!("  help / quit");
}
