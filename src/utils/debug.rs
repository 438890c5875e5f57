use once_cell::sync::Lazy;

/// Global debug mode flag, initialized once at startup
pub static DEBUG_MODE: Lazy<bool> = Lazy::new(|| std::env::var("TARIFF_DEBUG").is_ok());

/// Conditional debug output macro
///
/// Prints to stderr only when `TARIFF_DEBUG` is set.
///
/// # Examples
///
/// ```
/// use ewa_tariff::debug_println;
/// let slabs = 3;
/// debug_println!("Loaded tariff with {} slabs", slabs);
/// ```
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if *$crate::utils::debug::DEBUG_MODE {
            eprintln!($($arg)*);
        }
    };
}
