use crate::api::{RawDetail, RawSprites};
use crate::domain::{PokemonId, Stat, Summary};
use crate::error::CatalogError;

pub fn select_image(sprites: &RawSprites) -> (String, Option<String>) {
    let sprite = sprites.front_default.clone();
    let image = sprites
        .official_artwork()
        .map(|url| url.to_string())
        .or_else(|| sprite.clone())
        .unwrap_or_default();
    (image, sprite)
}

pub fn normalize(detail: RawDetail) -> Result<Summary, CatalogError> {
    let id = PokemonId::new(detail.id)?;
    let (image, sprite) = select_image(&detail.sprites);

    let mut types = detail.types;
    // stable: duplicate slots keep upstream order
    types.sort_by_key(|entry| entry.slot);

    Ok(Summary {
        id,
        name: detail.name,
        image,
        sprite,
        height: detail.height,
        weight: detail.weight,
        base_experience: detail.base_experience.unwrap_or(0),
        abilities: detail
            .abilities
            .into_iter()
            .map(|entry| entry.ability.name)
            .collect(),
        stats: detail
            .stats
            .into_iter()
            .map(|entry| Stat {
                name: entry.stat.name,
                value: entry.base_stat,
            })
            .collect(),
        types: types.into_iter().map(|entry| entry.kind.name).collect(),
    })
}
