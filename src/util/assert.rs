use std::fmt;

pub fn assert_same_type<T, U>(_: &T, _: &U) {}
pub fn assert_type<T>(_: &T) {}

/// Shared panic path for the `check` macros, keeping the message layout in one place.
#[doc(hidden)]
#[track_caller]
pub fn fail(location: &str, condition: &str, detail: Option<fmt::Arguments>) -> ! {
    match detail {
        Some(detail) => panic!("check failed: {location}: {condition}: {detail}"),
        None => panic!("check failed: {location}: {condition}"),
    }
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! current_location {
    () => {
        format!("{}:{}", file!(), line!())
    };
}
#[allow(unused_imports)]
pub use current_location;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check {
    ($cond:expr) => {{
        let value = $cond;
        $crate::util::assert::assert_type::<bool>(&value);
        if !value {
            $crate::util::assert::fail(
                &$crate::util::assert::current_location!(),
                stringify!($cond),
                None,
            );
        }
    }};
    ($cond:expr, $extra:expr) => {{
        let value = $cond;
        $crate::util::assert::assert_type::<bool>(&value);
        if !value {
            $crate::util::assert::fail(
                &$crate::util::assert::current_location!(),
                stringify!($cond),
                Some(format_args!("{}", $extra)),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_false {
    ($cond:expr) => {{
        let value = $cond;
        $crate::util::assert::assert_type::<bool>(&value);
        if value {
            $crate::util::assert::fail(
                &$crate::util::assert::current_location!(),
                concat!("!", stringify!($cond)),
                None,
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_false;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_eq {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        if lhs != rhs {
            $crate::util::assert::fail(
                &$crate::util::assert::current_location!(),
                concat!(stringify!($lhs), " == ", stringify!($rhs)),
                Some(format_args!("{:?} vs. {:?}", lhs, rhs)),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_eq;

/// Strict `<`; an optional third argument is appended to the failure message.
#[allow(unused_macros)]
#[macro_export]
macro_rules! check_lt {
    ($lhs:expr, $rhs:expr $(, $extra:expr)?) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        if lhs >= rhs {
            let extra = String::new() $(+ &format!(": {}", $extra))?;
            $crate::util::assert::fail(
                &$crate::util::assert::current_location!(),
                concat!(stringify!($lhs), " < ", stringify!($rhs)),
                Some(format_args!("{:?} vs. {:?}{}", lhs, rhs, extra)),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_lt;

/// For any two values with an `almost_eq()` method, e.g. vectors and matrices.
#[allow(unused_macros)]
#[macro_export]
macro_rules! check_almost_eq {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        if !lhs.almost_eq(rhs) {
            $crate::util::assert::fail(
                &$crate::util::assert::current_location!(),
                concat!(stringify!($lhs), " ~= ", stringify!($rhs)),
                Some(format_args!("{:?} vs. {:?}", lhs, rhs)),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_almost_eq;
