//! PokeAPI response shapes.
//!
//! Only the fields the viewer reads are declared; serde ignores the rest.

use serde::Deserialize;

use super::models::{Entry, EntryRef, IndexItem, Stat};

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDto {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: SpritesDto,
    #[serde(default)]
    pub stats: Vec<StatSlotDto>,
    #[serde(default)]
    pub types: Vec<TypeSlotDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpritesDto {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlotDto {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlotDto {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// `GET /pokemon?limit=N`
#[derive(Debug, Clone, Deserialize)]
pub struct IndexPageDto {
    pub results: Vec<NamedResource>,
}

/// `GET /generation/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationDto {
    pub pokemon_species: Vec<NamedResource>,
}

/// `GET /type/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDto {
    pub pokemon: Vec<TypeMemberDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeMemberDto {
    pub pokemon: NamedResource,
}

impl From<PokemonDto> for Entry {
    fn from(dto: PokemonDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            image_url: dto.sprites.front_default,
            stats: dto
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    base_value: s.base_stat,
                })
                .collect(),
            types: dto.types.into_iter().map(|t| t.kind.name).collect(),
        }
    }
}

impl IndexPageDto {
    pub fn into_items(self) -> Vec<IndexItem> {
        self.results
            .into_iter()
            .map(|r| IndexItem::new(r.name, EntryRef::Url(r.url)))
            .collect()
    }
}

impl GenerationDto {
    /// Species are addressed by the numeric id in their URL, since the
    /// default variety shares it. Species names do not always match a
    /// `/pokemon/{name}` record.
    pub fn into_items(self) -> Vec<IndexItem> {
        self.pokemon_species
            .into_iter()
            .map(|s| {
                let reference = match trailing_id(&s.url) {
                    Some(id) => EntryRef::Id(id),
                    None => EntryRef::Name(s.name.clone()),
                };
                IndexItem::new(s.name, reference)
            })
            .collect()
    }
}

impl TypeDto {
    pub fn into_items(self) -> Vec<IndexItem> {
        self.pokemon
            .into_iter()
            .map(|m| IndexItem::new(m.pokemon.name, EntryRef::Url(m.pokemon.url)))
            .collect()
    }
}

/// Extract the trailing numeric segment of a resource URL,
/// e.g. `.../pokemon-species/25/` -> 25.
pub fn trailing_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}
