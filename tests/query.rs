use pokedex_catalog::domain::{PokemonId, Summary};
use pokedex_catalog::query::{
    SortKey, SortOrder, TypeSelection, all_types, filter_by_types, search_and_sort,
};

fn summary(id: u32, name: &str, height: u32, weight: u32, xp: u32, types: &[&str]) -> Summary {
    Summary {
        id: PokemonId::new(id).unwrap(),
        name: name.to_string(),
        image: String::new(),
        sprite: None,
        height,
        weight,
        base_experience: xp,
        abilities: Vec::new(),
        stats: Vec::new(),
        types: types.iter().map(|t| t.to_string()).collect(),
    }
}

fn roster() -> Vec<Summary> {
    vec![
        summary(1, "bulbasaur", 7, 69, 64, &["grass", "poison"]),
        summary(4, "charmander", 6, 85, 62, &["fire"]),
        summary(6, "charizard", 17, 905, 240, &["fire", "flying"]),
        summary(25, "pikachu", 4, 60, 112, &["electric"]),
        summary(122, "mr-mime", 13, 545, 161, &["psychic", "fairy"]),
    ]
}

fn names(items: &[Summary]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

#[test]
fn search_is_trimmed_and_case_insensitive() {
    let items = roster();
    let found = search_and_sort(&items, "  CHAR ", SortKey::Id, SortOrder::Asc);
    assert_eq!(names(&found), vec!["charmander", "charizard"]);
}

#[test]
fn empty_search_matches_everything() {
    let items = roster();
    let found = search_and_sort(&items, "", SortKey::Id, SortOrder::Asc);
    assert_eq!(found.len(), items.len());
}

#[test]
fn sorts_by_each_key() {
    let items = roster();
    let by_name = search_and_sort(&items, "", SortKey::Name, SortOrder::Asc);
    assert_eq!(
        names(&by_name),
        vec!["bulbasaur", "charizard", "charmander", "mr-mime", "pikachu"]
    );

    let by_height = search_and_sort(&items, "", SortKey::Height, SortOrder::Desc);
    assert_eq!(names(&by_height)[0], "charizard");

    let by_weight = search_and_sort(&items, "", SortKey::Weight, SortOrder::Asc);
    assert_eq!(names(&by_weight)[0], "pikachu");

    let by_xp = search_and_sort(&items, "", SortKey::BaseExperience, SortOrder::Asc);
    assert_eq!(names(&by_xp), vec!["charmander", "bulbasaur", "pikachu", "mr-mime", "charizard"]);

    let by_id_desc = search_and_sort(&items, "", SortKey::Id, SortOrder::Desc);
    assert_eq!(by_id_desc[0].id.get(), 122);
}

#[test]
fn sort_key_parses_cli_spellings() {
    assert_eq!("base-experience".parse::<SortKey>().unwrap(), SortKey::BaseExperience);
    assert_eq!(" Name ".parse::<SortKey>().unwrap(), SortKey::Name);
    assert!("speed".parse::<SortKey>().is_err());
    assert_eq!(SortKey::BaseExperience.to_string(), "base-experience");
    assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
}

#[test]
fn all_types_is_sorted_and_deduplicated() {
    assert_eq!(
        all_types(&roster()),
        vec!["electric", "fairy", "fire", "flying", "grass", "poison", "psychic"]
    );
    assert!(all_types(&[]).is_empty());
}

#[test]
fn filter_requires_every_selected_type() {
    let items = roster();
    assert_eq!(filter_by_types(&items, &[]).len(), items.len());

    let fire = filter_by_types(&items, &["fire".to_string()]);
    assert_eq!(names(&fire), vec!["charmander", "charizard"]);

    let fire_flying = filter_by_types(&items, &["flying".to_string(), "fire".to_string()]);
    assert_eq!(names(&fire_flying), vec!["charizard"]);

    let none = filter_by_types(&items, &["fire".to_string(), "grass".to_string()]);
    assert!(none.is_empty());
}

#[test]
fn type_selection_toggles() {
    let items = roster();
    let mut selection = TypeSelection::new();
    assert!(selection.toggle("fire"));
    assert!(selection.toggle("flying"));
    assert_eq!(names(&selection.apply(&items)), vec!["charizard"]);

    assert!(!selection.toggle("flying"));
    assert!(!selection.contains("flying"));
    assert_eq!(selection.as_slice(), &["fire".to_string()]);

    selection.clear();
    assert!(selection.as_slice().is_empty());
    assert_eq!(selection.apply(&items).len(), items.len());

    let collected: TypeSelection = ["grass", "grass", "poison"].into_iter().collect();
    assert_eq!(collected.as_slice().len(), 2);
}
