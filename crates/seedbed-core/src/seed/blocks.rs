//! Content block transformation

use crate::errors::Result;
use crate::model::{AssetRef, ContentBlock, SliderFiles};
use crate::seed::assets::AssetResolver;

/// Resolve the asset fields of `blocks`, keeping length, order and kinds
///
/// Returns new blocks; the input is left untouched so fixtures stay
/// reusable. Fields that are already resolved are carried over as is.
pub async fn transform_blocks(
    resolver: &AssetResolver,
    blocks: &[ContentBlock],
) -> Result<Vec<ContentBlock>> {
    let mut updated = Vec::with_capacity(blocks.len());

    for block in blocks {
        let next = match block {
            ContentBlock::Media {
                file: AssetRef::Name(file_name),
                fields,
            } => ContentBlock::Media {
                file: AssetRef::Resolved(resolver.resolve_one(file_name).await?),
                fields: fields.clone(),
            },
            ContentBlock::Slider {
                files: SliderFiles::Names(file_names),
                fields,
            } => ContentBlock::Slider {
                files: SliderFiles::Resolved(resolver.resolve(file_names).await?),
                fields: fields.clone(),
            },
            ContentBlock::Media {
                file: AssetRef::Resolved(_),
                ..
            }
            | ContentBlock::Slider {
                files: SliderFiles::Resolved(_),
                ..
            }
            | ContentBlock::Generic { .. } => block.clone(),
        };
        updated.push(next);
    }

    Ok(updated)
}
