//! 内容服务的资源路径

fn segment(id: &str) -> &str {
    id.trim_matches('/')
}

pub fn problems() -> String {
    "/problems".to_string()
}

pub fn problem(id: &str) -> String {
    format!("/problems/{}", segment(id))
}

pub fn problem_contests(id: &str) -> String {
    format!("/problems/{}/contests", segment(id))
}

pub fn problem_testcases(id: &str) -> String {
    format!("/problems/{}/testcases", segment(id))
}

pub fn problem_submit(id: &str) -> String {
    format!("/problems/{}/submit", segment(id))
}

pub fn contests() -> String {
    "/contests".to_string()
}

pub fn contest(id: &str) -> String {
    format!("/contests/{}", segment(id))
}

pub fn solutions() -> String {
    "/solutions".to_string()
}

pub fn solution(id: &str) -> String {
    format!("/solutions/{}", segment(id))
}

pub fn submissions() -> String {
    "/submissions".to_string()
}

pub fn submission(id: &str) -> String {
    format!("/submissions/{}", segment(id))
}
