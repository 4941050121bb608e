#[macro_export]
macro_rules! timeit {
    // timed expression
    ($code:expr) => {
        $crate::_timeit_internal!("Anonymous code", $code)
    };

    // timed block
    ($code:block) => {
        $crate::_timeit_internal!("Anonymous code", $code)
    };

    // named expression
    ($name:literal, $code:expr) => {
        $crate::_timeit_internal!($name, $code)
    };

    // named block
    ($name:literal, $code:block) => {
        $crate::_timeit_internal!($name, $code)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! _timeit_internal {
    ($label:expr, $code:expr) => {{
        let start = std::time::Instant::now();
        let result = $code;
        let duration = start.elapsed();

        log::info!("{} took {:.4} seconds", $label, duration.as_secs_f64());

        result
    }};
}
