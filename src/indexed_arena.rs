use std::marker::PhantomData;

use generational_arena::Arena;
use generational_arena::Index;

/// This simply adds a layer of type safety around the arena, making sure
/// we cannot accidentally confuse indices into the different arenas of the
/// triangulation (i.e. use an edge index for the triangle arena).
#[derive(Clone)]
pub struct IndexedArena<Id, T> {
    _marker: PhantomData<Id>,
    arena: Arena<T>,
}

impl<Id, T> Default for IndexedArena<Id, T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
            arena: Arena::default(),
        }
    }
}

impl<Id: Into<Index> + From<Index>, T> IndexedArena<Id, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.arena.get(id.into())
    }

    pub fn insert(&mut self, t: T) -> Id {
        self.arena.insert(t).into()
    }

    pub fn remove(&mut self, index: Id) -> Option<T> {
        self.arena.remove(index.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, &T)> {
        self.arena.iter().map(|(idx, t)| (idx.into(), t))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.arena.contains(id.into())
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }
}

impl<Id: Into<Index> + From<Index>, T> std::ops::Index<Id> for IndexedArena<Id, T> {
    type Output = T;

    fn index(&self, index: Id) -> &Self::Output {
        &self.arena[index.into()]
    }
}

impl<Id: Into<Index> + From<Index>, T> std::ops::IndexMut<Id> for IndexedArena<Id, T> {
    fn index_mut(&mut self, index: Id) -> &mut Self::Output {
        &mut self.arena[index.into()]
    }
}
