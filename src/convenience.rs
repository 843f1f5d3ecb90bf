//! Table definition macro.
//!
//! Every documented response code appears twice: once as a named constant on
//! its code type, once as a row of the message table. `define_response_codes!`
//! emits both from a single list so the two can never drift apart.
//!
//! # Usage
//!
//! ```rust,ignore
//! define_response_codes! {
//!     Fmt0Code, FORMAT0_MESSAGES => {
//!         INITIALIZE = (0x00, "TPM not initialized by TPM2_Startup or already initialized"),
//!         FAILURE    = (0x01, "commands not being accepted because of a TPM failure"),
//!     }
//! }
//! ```
//!
//! expands to
//!
//! ```rust,ignore
//! impl Fmt0Code {
//!     pub const INITIALIZE: Fmt0Code = Fmt0Code::new(0x00);
//!     pub const FAILURE: Fmt0Code = Fmt0Code::new(0x01);
//! }
//!
//! pub static FORMAT0_MESSAGES: MessageTable = MessageTable::new(&[
//!     (0x00, "TPM not initialized by TPM2_Startup or already initialized"),
//!     (0x01, "commands not being accepted because of a TPM failure"),
//! ]);
//! ```
//!
//! The description doubles as the constant's rustdoc. The table is built by
//! a `const fn`, so duplicate codes fail the build.
//!
//! The macro adds inherent constants to the code type, so it is only usable
//! inside this crate.

/// Define named code constants and their message table in one pass.
macro_rules! define_response_codes {
    ($ty:ident, $table:ident => { $( $name:ident = ($code:expr, $message:expr) ),+ $(,)? }) => {
        impl $crate::codes::$ty {
            $(
                #[doc = $message]
                pub const $name: $crate::codes::$ty = $crate::codes::$ty::new($code);
            )+
        }

        #[doc = concat!("Message table for [`", stringify!($ty), "`].")]
        pub static $table: $crate::codes::MessageTable = $crate::codes::MessageTable::new(&[
            $( ($code, $message), )+
        ]);
    };
}

pub(crate) use define_response_codes;

// ============================================================================
// Tests
// ============================================================================
