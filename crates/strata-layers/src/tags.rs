//! Type-level layer markers.
//!
//! Each marker binds a [`LayerResult`](crate::LayerResult) or
//! [`LayerOutput`](crate::LayerOutput) to one canonical [`Layer`]. The set is
//! closed: downstream crates cannot add layers to the chain.

use strata_core::Layer;

mod sealed {
    pub trait Sealed {}
}

/// A layer of the canonical promotion chain.
pub trait LayerTag: sealed::Sealed + Copy + Default + std::fmt::Debug + Eq + 'static {
    const LAYER: Layer;
}

macro_rules! layer_tag {
    ($($(#[$doc:meta])* $name:ident => $layer:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl sealed::Sealed for $name {}

            impl LayerTag for $name {
                const LAYER: Layer = Layer::$layer;
            }
        )+
    };
}

layer_tag!(
    /// Domain entities and value objects.
    EntityLayer => Entity,
    /// Row/DTO to entity mapping.
    MapperLayer => Mapper,
    /// Storage, network, and other adapters.
    InfraLayer => Infrastructure,
    RepoLayer => Repository,
    ServiceLayer => Service,
    UseCaseLayer => UseCase,
    /// Process boundary.
    WebLayer => Web,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_of<L: LayerTag>() -> Layer {
        L::LAYER
    }

    #[test]
    fn markers_follow_the_chain() {
        let chain = [
            layer_of::<EntityLayer>(),
            layer_of::<MapperLayer>(),
            layer_of::<InfraLayer>(),
            layer_of::<RepoLayer>(),
            layer_of::<ServiceLayer>(),
            layer_of::<UseCaseLayer>(),
            layer_of::<WebLayer>(),
        ];
        assert!(chain.windows(2).all(|w| w[0].is_promotion_to(w[1])));
    }
}
