//! Public role permission grants
//!
//! All grants are issued at once and awaited together. Grants share no
//! state, so this is the one step of the run that fans out.

use futures::future::join_all;
use std::time::Instant;

use crate::errors::{ExError, Result, SeedError};
use crate::model::{ActionMap, PermissionGrant};
use crate::ports::ContentService;
use crate::{log_op_end, log_op_error, log_op_start};

pub const PUBLIC_ROLE: &str = "public";

const OP: &str = "grant_permissions";

/// Grant every (content type, action) pair of `actions` to the public role
///
/// Every request is awaited even when one fails; the first failure in
/// declaration order is then returned. Nothing is retried.
pub async fn grant_public_permissions(
    content: &dyn ContentService,
    actions: &ActionMap,
) -> Result<Vec<PermissionGrant>> {
    let start = Instant::now();
    log_op_start!(OP, pairs = actions.len());

    match grant_all(content, actions).await {
        Ok(grants) => {
            log_op_end!(
                OP,
                duration_ms = start.elapsed().as_millis() as u64,
                grants = grants.len()
            );
            Ok(grants)
        }
        Err(err) => {
            log_op_error!(OP, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
            Err(err)
        }
    }
}

async fn grant_all(
    content: &dyn ContentService,
    actions: &ActionMap,
) -> Result<Vec<PermissionGrant>> {
    let role = content
        .find_role(PUBLIC_ROLE)
        .await?
        .ok_or_else(|| SeedError::RoleNotFound {
            role_type: PUBLIC_ROLE.to_string(),
        })?;

    let grants = actions.grants(role.id);
    let results = join_all(grants.iter().map(|grant| content.create_permission(grant))).await;

    if let Some((grant, err)) = grants
        .iter()
        .zip(results)
        .find_map(|(grant, result)| result.err().map(|err| (grant, err)))
    {
        let reason = err.to_string();
        return Err(ExError::from(SeedError::PermissionGrantFailed {
            action: grant.action_uid(),
            reason,
        })
        .with_content_type(grant.content_type.as_str())
        .with_source(err));
    }

    Ok(grants)
}
