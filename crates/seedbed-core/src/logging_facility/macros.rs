//! Operation boundary macros
//!
//! Every boundary event carries `component` (the calling module), `op` and
//! `event`. Extra fields use the usual `tracing` field syntax and are
//! appended after the canonical ones.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)+)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event
            $(, $($field)+)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use seedbed_core::log_op_start;
/// log_op_start!("import_articles");
/// log_op_start!("import_articles", records = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::core_types::schema::EVENT_START
            $(, $($field)+)?
        )
    };
}

/// Log the successful end of an operation; `duration_ms` is mandatory
///
/// ```
/// # use seedbed_core::log_op_end;
/// log_op_end!("import_articles", duration_ms = 42);
/// log_op_end!("import_articles", duration_ms = 42, created = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)+)?
        )
    };
}

/// Log a failed operation
///
/// `$err` is anything convertible into `ExError`, so the event always
/// carries `err_kind`, `err_code` and the rendered error.
///
/// ```
/// # use seedbed_core::log_op_error;
/// # use seedbed_core::errors::SeedError;
/// let err = SeedError::EmptyUpload { file_name: "a.jpg".to_string() };
/// log_op_error!("upload", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = %ex_err
            $(, $($field)+)?
        )
    }};
}
