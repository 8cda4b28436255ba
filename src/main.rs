use log::error;
use recipe_search::{
    FavoritesStore, FileStore, Recipe, RecipeSearch, RecipeSearchError, RecipeSearchService,
    SearchConfig,
};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "\
Usage:
  recipe-search <query>             Search recipes (* marks favorites)
  recipe-search --favorites         List favorite recipes
  recipe-search --add <id> <query>  Search <query> and favorite the result with <id>
  recipe-search --remove <id>       Remove the favorite with <id>";

enum Command {
    Search(String),
    List,
    Add { id: String, query: String },
    Remove(String),
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [flag] if flag == "--favorites" => Some(Command::List),
        [flag, id, query @ ..] if flag == "--add" && !query.is_empty() => Some(Command::Add {
            id: id.clone(),
            query: query.join(" "),
        }),
        [flag, id] if flag == "--remove" => Some(Command::Remove(id.clone())),
        [first, ..] if first.starts_with("--") => None,
        [] => None,
        words => Some(Command::Search(words.join(" "))),
    }
}

fn print_recipes(recipes: &[Recipe]) {
    for recipe in recipes {
        let marker = if recipe.is_favorite { "*" } else { " " };
        println!("{} {:>8}  {}", marker, recipe.recipe_id, recipe.title);
        if !recipe.source_url.is_empty() {
            println!("             {}", recipe.source_url);
        }
    }
}

fn favorites_for(config: &SearchConfig) -> FavoritesStore {
    FavoritesStore::new(Arc::new(FileStore::new(config.favorites_path.clone())))
}

fn search_service(config: SearchConfig) -> Result<RecipeSearchService, RecipeSearchError> {
    RecipeSearch::builder().config(config).build()
}

async fn run(config: SearchConfig, command: Command) -> Result<(), RecipeSearchError> {
    match command {
        Command::Search(query) => {
            let recipes = search_service(config)?.search(&query).await?;
            if recipes.is_empty() {
                println!("No recipes found for \"{}\"", query);
            }
            print_recipes(&recipes);
        }
        Command::List => print_recipes(&favorites_for(&config).get_favorites()),
        Command::Add { id, query } => {
            let service = search_service(config)?;
            let recipes = service.search(&query).await?;
            match recipes.iter().find(|r| r.recipe_id.as_str() == id) {
                Some(recipe) => {
                    service.favorites().add_favorite(recipe)?;
                    println!("Added \"{}\" to favorites", recipe.title);
                }
                None => println!("No recipe with id {} in results for \"{}\"", id, query),
            }
        }
        Command::Remove(id) => {
            // Removal only looks at the id.
            favorites_for(&config).remove_favorite(&Recipe::new(id.as_str(), ""))?;
            println!("Removed {} from favorites", id);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let config = match SearchConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
