use rand::RngCore;

/// Interned handle into a [`crate::TileRegistry`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileTypeId(pub u16);

impl TileTypeId {
    /// Always registered first; the air sentinel.
    pub const EMPTY: TileTypeId = TileTypeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

/// Background wall behind a cell's foreground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Wall {
    #[default]
    None,
    Tile(TileTypeId),
}

impl Wall {
    #[inline]
    pub fn type_id(self) -> Option<TileTypeId> {
        match self {
            Wall::None => None,
            Wall::Tile(id) => Some(id),
        }
    }
}

impl From<Option<TileTypeId>> for Wall {
    fn from(v: Option<TileTypeId>) -> Self {
        v.map_or(Wall::None, Wall::Tile)
    }
}

/// Content of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    pub ty: TileTypeId,
    pub wall: Wall,
    pub variant: u8,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        ty: TileTypeId::EMPTY,
        wall: Wall::None,
        variant: 0,
    };

    #[inline]
    pub const fn new(ty: TileTypeId, wall: Wall, variant: u8) -> Self {
        Self { ty, wall, variant }
    }

    #[inline]
    pub const fn plain(ty: TileTypeId) -> Self {
        Self {
            ty,
            wall: Wall::None,
            variant: 0,
        }
    }
}

/// Immutable descriptor shared by every cell of that type.
#[derive(Clone, Debug, PartialEq)]
pub struct TileType {
    pub id: TileTypeId,
    pub key: String,
    pub name: String,
    pub description: String,
    pub max_health: u32,
    pub solid: bool,
    /// Intrinsic light emission. May exceed 1.0.
    pub glow: f32,
    pub map_color: [u8; 4],
    pub sprite_variants: Vec<String>,
}

impl TileType {
    #[inline]
    pub fn variant_count(&self) -> usize {
        self.sprite_variants.len()
    }

    /// Uniform pick among sprite variants; 0 when the type has none.
    pub fn random_variant<R: RngCore + ?Sized>(&self, rng: &mut R) -> u8 {
        let n = self.sprite_variants.len().min(u8::MAX as usize + 1);
        if n <= 1 {
            return 0;
        }
        (rng.next_u32() % n as u32) as u8
    }
}
