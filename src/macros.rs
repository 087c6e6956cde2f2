// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

#[macro_export]
macro_rules! strings {
    // Vec<String> from literals: strings!["Jenna", "Coach"]
    ($($item:expr),* $(,)?) => {
        ::std::vec![$(::std::string::String::from($item)),*]
    };
}
