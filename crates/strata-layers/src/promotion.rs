//! Upward promotion through `From`.
//!
//! Only strictly upward pairs of the chain get an impl, so
//! `let svc: ServiceResult = repo.into();` compiles while the reverse does
//! not.

use crate::output::LayerOutput;
use crate::result::LayerResult;
use crate::tags::{
    EntityLayer, InfraLayer, MapperLayer, RepoLayer, ServiceLayer, UseCaseLayer, WebLayer,
};

macro_rules! promote_upward {
    ($from:ty => $($to:ty),+ $(,)?) => {
        $(
            impl From<LayerResult<$from>> for LayerResult<$to> {
                fn from(result: LayerResult<$from>) -> Self {
                    result.retag()
                }
            }

            impl<T> From<LayerOutput<$from, T>> for LayerOutput<$to, T> {
                fn from(output: LayerOutput<$from, T>) -> Self {
                    output.retag()
                }
            }
        )+
    };
}

promote_upward!(EntityLayer => MapperLayer, InfraLayer, RepoLayer, ServiceLayer, UseCaseLayer, WebLayer);
promote_upward!(MapperLayer => InfraLayer, RepoLayer, ServiceLayer, UseCaseLayer, WebLayer);
promote_upward!(InfraLayer => RepoLayer, ServiceLayer, UseCaseLayer, WebLayer);
promote_upward!(RepoLayer => ServiceLayer, UseCaseLayer, WebLayer);
promote_upward!(ServiceLayer => UseCaseLayer, WebLayer);
promote_upward!(UseCaseLayer => WebLayer);
