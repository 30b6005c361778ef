/// Generate a crate-internal fetch method for one dataset of one unit.
///
/// The generated method skips connectors that do not expose `accessor`, then
/// defers to `fetch_single_priority_with_fallback` for ordering, timeouts and
/// error collapsing. `arg` must be `Copy`.
macro_rules! gridwatch_unit_fetch {
    (
        $(#[$meta:meta])*
        method: $name:ident( $arg_ident:ident : $arg_ty:ty ) -> $ret:ty,
        accessor: $accessor:ident,
        capability: $capability:expr,
        call: $call_name:ident
    ) => {
        $(#[$meta])*
        pub(crate) async fn $name(
            &self,
            unit: &gridwatch_core::UnitId,
            $arg_ident: $arg_ty,
        ) -> Result<$ret, gridwatch_core::GridError> {
            self.fetch_single_priority_with_fallback(unit, $capability, move |c, u| {
                c.$accessor()?;
                Some(async move {
                    match c.$accessor() {
                        Some(p) => p.$call_name(&u, $arg_ident).await,
                        None => Err(gridwatch_core::GridError::connector(
                            c.name(),
                            format!("missing {} capability during call", $capability),
                        )),
                    }
                })
            })
            .await
        }
    };
}
