//! Declaration API, called while a page is being rendered.

use crate::asset::{AssetKind, Requirement};
use crate::debug;
use crate::engine::Requires;
use crate::error::RequiresError;
use crate::registry::{RequestContext, token};

impl Requires {
    /// Declare that the page needs `filenames`.
    ///
    /// Returns the concatenated placeholder tokens to embed in the markup.
    /// Files already declared in this request contribute nothing. If any
    /// name has an unsupported extension, nothing is declared.
    pub fn declare_files<S: AsRef<str>>(
        &self,
        ctx: &mut RequestContext,
        group: &str,
        filenames: &[S],
    ) -> Result<String, RequiresError> {
        let requirements = filenames
            .iter()
            .map(|name| {
                let name = name.as_ref();
                AssetKind::from_filename(name).map(|kind| Requirement::file(kind, name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(requirements
            .into_iter()
            .map(|requirement| self.declare(ctx, group, requirement))
            .collect())
    }

    /// Declare an inline block.
    ///
    /// `blocktype` is `script` or `style`. For incremental requests the
    /// rendered block is returned directly and nothing is queued.
    pub fn declare_block(
        &self,
        ctx: &mut RequestContext,
        group: &str,
        blocktype: &str,
        name: &str,
        content: &str,
    ) -> Result<String, RequiresError> {
        let kind = AssetKind::from_blocktype(blocktype)?;
        let requirement = Requirement::block(kind, name, content);

        if ctx.is_incremental() {
            if !ctx.mark_seen(name) {
                return Ok(String::new());
            }
            debug!("declare"; "{} block `{}` rendered inline", kind, name);
            return Ok(requirement.render(self.config()));
        }

        Ok(self.declare(ctx, group, requirement))
    }

    /// Queue a requirement and return its token, or nothing if its unique
    /// id was already declared.
    fn declare(&self, ctx: &mut RequestContext, group: &str, requirement: Requirement) -> String {
        if !ctx.mark_seen(requirement.unique_id()) {
            debug!("declare"; "skipping duplicate `{}`", requirement.unique_id());
            return String::new();
        }
        let kind = requirement.kind();
        let name = requirement.unique_id().to_string();
        let index = ctx.push(group, requirement);
        debug!("declare"; "{} `{}` -> {}#{}", kind, name, group, index);
        token::encode(&self.config().asset(kind).token, group, index)
    }
}
