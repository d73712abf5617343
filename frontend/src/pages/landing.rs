use chrono::Datelike;
use yew::prelude::*;

use crate::animation::{RandomSource, SeededRandom};
use crate::components::animated_counter::AnimatedCounter;
use crate::config;
use crate::web::PageAnimations;

struct Feature {
    title: &'static str,
    text: &'static str,
    points: [&'static str; 3],
}

static FEATURES: [Feature; 6] = [
    Feature {
        title: "Unified Player Profiles",
        text: "One living profile for highlights, stats, academics and availability that recruiters can trust.",
        points: [
            "Video highlights & performance metrics",
            "Academic & eligibility data",
            "Availability & contract status",
        ],
    },
    Feature {
        title: "Intelligent Talent Match",
        text: "Recruiters find the right athletes faster with scoring tuned to role, position and growth.",
        points: [
            "Role & position specific scoring",
            "Trajectory & growth signals",
            "Smart recruiter filters",
        ],
    },
    Feature {
        title: "Secure Offers & Communication",
        text: "Talk, negotiate and sign without leaving the platform.",
        points: [
            "End-to-end encrypted chats",
            "Structured offer workflow",
            "Compliance audit trail",
        ],
    },
    Feature {
        title: "Tournament Hosting & Management",
        text: "Run showcases and leagues end to end, from brackets to MVP awards.",
        points: [
            "Bracket & scheduling tools",
            "Live scoring + leaderboards",
            "MVP & badge automation",
        ],
    },
    Feature {
        title: "Career Badge System",
        text: "Earn recognition that recruiters notice, on and off the field.",
        points: [
            "Performance & consistency tiers",
            "Academic achievement badges",
            "MVP & signing milestones",
        ],
    },
    Feature {
        title: "Real-Time Performance Analytics",
        text: "See progress as it happens and compare against the athletes you compete with.",
        points: [
            "Progression & trend charts",
            "Workload & load balance",
            "Cohort benchmarking",
        ],
    },
];

struct Testimonial {
    quote: &'static str,
    name: &'static str,
    role: &'static str,
}

static TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        quote: "SportsIn cut my scouting cycle by weeks. Filtered dashboards + verified metrics = faster, better offers.",
        name: "College Recruiter",
        role: "NCAA Program",
    },
    Testimonial {
        quote: "I hosted a regional showcase in hours—automated brackets, live stats and MVP badge distribution worked flawlessly.",
        name: "Tournament Organizer",
        role: "Regional Showcase",
    },
    Testimonial {
        quote: "Badges gamified my grind. Coaches mentioned my Consistency & Academic badges in every call.",
        name: "Rising Athlete",
        role: "High School Midfielder, Class of 2026",
    },
];

static NAV_LINKS: [(&str, &str); 5] = [
    ("Home", "#home"),
    ("Platform", "#platform"),
    ("Impact", "#impact"),
    ("Testimonials", "#testimonials"),
    ("Download", "#download"),
];

/// Left/top percentages for the ambient particle field.
fn particle_positions(random: &mut dyn RandomSource, count: usize) -> Vec<(f64, f64)> {
    (0..count)
        .map(|_| (random.in_range(0.0, 100.0), random.in_range(0.0, 100.0)))
        .collect()
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let particles = use_state(|| {
        let mut random = SeededRandom::from_seed(web_sys::js_sys::Date::now() as u64);
        particle_positions(&mut random, config::PARTICLE_COUNT)
    });
    let menu_open = use_state(|| false);

    // Scroll to top on first mount, then own the page animations until unmount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                let animations = PageAnimations::mount();
                move || drop(animations)
            },
            (),
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };
    let year = chrono::Local::now().year();

    html! {
        <div class="sportsin-landing">
            <div class="particle-field" aria-hidden="true">
                { for particles.iter().map(|(left, top)| html! {
                    <div class="particle" style={format!("left: {:.2}%; top: {:.2}%;", left, top)}></div>
                }) }
            </div>

            <header class="site-header">
                <div class="header-content">
                    <a href="#home" class="logo">{"Sports"}<span>{"In"}</span></a>
                    <nav class={classes!("header-nav", (*menu_open).then(|| "open"))}>
                        { for NAV_LINKS.iter().map(|(label, href)| html! {
                            <a href={*href} class="nav-link" onclick={close_menu.clone()}>{*label}</a>
                        }) }
                    </nav>
                    <button class="menu-toggle" aria-label="Toggle menu" onclick={toggle_menu}>
                        <span></span>
                        <span></span>
                        <span></span>
                    </button>
                </div>
            </header>

            <section id="home" class="hero">
                <div class="hero-copy">
                    <div class="hero-badge">{"THE SPORTS CAREER NETWORK"}</div>
                    <h1 class="hero-title">{"Recruit. Showcase. Get Signed."}</h1>
                    <p class="hero-subtitle">
                        {"SportsIn connects ambitious players with verified recruiters, scouts & clubs. Build a dynamic profile, earn career badges, join or host tournaments, analyze performance data, and secure real offers—on one platform."}
                    </p>
                    <div class="hero-buttons">
                        <a href="#platform" class="button primary">{"Explore Platform"}</a>
                        <a href="/sportsin-app.apk" class="button secondary" download="">{"Download App"}</a>
                    </div>
                    <div class="hero-stats">
                        <div class="stat">
                            <div class="stat-value"><AnimatedCounter end={25000.0} suffix="+" /></div>
                            <div class="stat-label">{"REGISTERED ATHLETES"}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-value"><AnimatedCounter end={1800.0} suffix="+" /></div>
                            <div class="stat-label">{"RECRUITERS & SCOUTS"}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-value">
                                <AnimatedCounter end={2.5} prefix="$" suffix="M+" decimals={1} />
                            </div>
                            <div class="stat-label">{"SCHOLARSHIP VALUE"}</div>
                        </div>
                    </div>
                </div>
                <div class="hero-phone">
                    <div class="ultra-premium-floating">
                        <img src="/assets/sample_1.jpg" alt="SportsIn app preview" />
                    </div>
                </div>
            </section>

            <section id="platform" class="platform">
                <h2 class="section-title">{"Everything A Sports Career Needs"}</h2>
                <div class="card-grid">
                    { for FEATURES.iter().map(|feature| html! {
                        <div class="ultra-premium-card">
                            <div class="card-glow ultra-premium-floating-slow"></div>
                            <h3>{feature.title}</h3>
                            <p>{feature.text}</p>
                            <ul>
                                { for feature.points.iter().map(|point| html! { <li>{*point}</li> }) }
                            </ul>
                        </div>
                    }) }
                </div>
            </section>

            <section id="download" class="download">
                <div class="download-content">
                    <div class="section-badge">{"GET THE APP"}</div>
                    <h2 class="section-title">{"Own Your Journey. Anytime, Anywhere."}</h2>
                    <p>
                        {"Record highlights, apply to openings, receive scout alerts, manage tournaments and unlock badges on the go. Available for Android (iOS coming soon)."}
                    </p>
                    <ul class="download-features">
                        <li>{"Instant Recruiter Alerts"}</li>
                        <li>{"Mobile Highlight Capture"}</li>
                        <li>{"Tournament Control Center"}</li>
                    </ul>
                    <div class="download-badges">
                        <a href="/sportsin-app.apk" class="download-badge" download="">{"Download for Android"}</a>
                        <span class="download-badge muted">{"iOS coming soon"}</span>
                    </div>
                    <p class="download-note">{"Early Access • Beta v1.0"}</p>
                </div>
                <div class="download-phones">
                    <img class="phone-float-1" src="/assets/sample_1.jpg" alt="SportsIn profile screen" />
                    <img class="phone-float-2" src="/assets/sample_1.jpg" alt="SportsIn tournament screen" />
                </div>
            </section>

            <section id="testimonials" class="testimonials">
                <h2 class="section-title">{"Trusted By Players & Recruiters"}</h2>
                <div class="testimonial-grid">
                    { for TESTIMONIALS.iter().map(|t| html! {
                        <div class="executive-testimonial">
                            <p class="quote">{format!("“{}”", t.quote)}</p>
                            <div class="author">
                                <strong>{t.name}</strong>
                                <span>{t.role}</span>
                            </div>
                        </div>
                    }) }
                </div>
            </section>

            <section id="impact" class="impact">
                <h2 class="section-title">{"Proven Growth & Opportunity"}</h2>
                <div class="impact-grid">
                    <div class="impact-item">
                        <div class="impact-value"><AnimatedCounter end={25000.0} suffix="+" /></div>
                        <div class="impact-label">{"Scholarship Dollars Facilitated"}</div>
                    </div>
                    <div class="impact-item">
                        <div class="impact-value"><AnimatedCounter end={1800.0} suffix="+" /></div>
                        <div class="impact-label">{"Verified Recruiter Network"}</div>
                    </div>
                    <div class="impact-item">
                        <div class="impact-value"><AnimatedCounter end={120000.0} suffix="+" /></div>
                        <div class="impact-label">{"Tournament Matches Logged"}</div>
                    </div>
                    <div class="impact-item">
                        <div class="impact-value"><AnimatedCounter end={93.0} suffix="%" /></div>
                        <div class="impact-label">{"Offer Acceptance Confidence"}</div>
                    </div>
                </div>
            </section>

            <section id="join" class="join">
                <div class="ultra-premium-cta">
                    <div class="section-badge">{"READY TO LEVEL UP"}</div>
                    <h2 class="section-title">{"Build Your Sports Career On SportsIn"}</h2>
                    <p>
                        {"Create your profile, start earning badges, apply to openings and receive real recruiter interest. The earlier you join—the faster you advance."}
                    </p>
                    <a href="/sportsin-app.apk" class="button primary" download="">{"Download SportsIn"}</a>
                </div>
            </section>

            <footer class="site-footer">
                <div class="footer-content">
                    <a href="#home" class="logo">{"Sports"}<span>{"In"}</span></a>
                    <nav class="footer-nav">
                        { for NAV_LINKS.iter().map(|(label, href)| html! {
                            <a href={*href}>{*label}</a>
                        }) }
                    </nav>
                    <a href="mailto:info@sportsin.com" class="footer-contact">{"info@sportsin.com"}</a>
                </div>
                <p class="copyright">{format!("© {} SportsIn. All rights reserved.", year)}</p>
            </footer>

            <style>
                {r#"
                .sportsin-landing {
                    position: relative;
                    min-height: 100vh;
                    background: #05070d;
                    color: #f5f7fb;
                    font-family: 'Inter', sans-serif;
                    overflow-x: hidden;
                }

                .particle-field {
                    position: fixed;
                    inset: 0;
                    pointer-events: none;
                    z-index: 0;
                }

                .particle {
                    position: absolute;
                    width: 4px;
                    height: 4px;
                    border-radius: 50%;
                    background: #1e90ff;
                }

                .site-header {
                    position: fixed;
                    top: 0;
                    width: 100%;
                    z-index: 10;
                    backdrop-filter: blur(12px);
                    background: rgba(5, 7, 13, 0.7);
                    border-bottom: 1px solid rgba(255, 255, 255, 0.06);
                }

                .header-content, .footer-content {
                    max-width: 1200px;
                    margin: 0 auto;
                    padding: 1rem 2rem;
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                }

                .logo {
                    font-size: 1.5rem;
                    font-weight: 800;
                    color: #fff;
                    text-decoration: none;
                }

                .logo span {
                    color: #1e90ff;
                }

                .header-nav {
                    display: flex;
                    gap: 2rem;
                }

                .nav-link, .footer-nav a {
                    color: #b8c1d9;
                    text-decoration: none;
                    transition: color 0.2s ease;
                }

                .nav-link:hover, .footer-nav a:hover {
                    color: #fff;
                }

                .menu-toggle {
                    display: none;
                    flex-direction: column;
                    gap: 4px;
                    background: none;
                    border: none;
                    cursor: pointer;
                }

                .menu-toggle span {
                    width: 24px;
                    height: 2px;
                    background: #fff;
                }

                section {
                    position: relative;
                    z-index: 1;
                    max-width: 1200px;
                    margin: 0 auto;
                    padding: 8rem 2rem 4rem;
                }

                .hero {
                    display: grid;
                    grid-template-columns: 1.2fr 1fr;
                    gap: 4rem;
                    align-items: center;
                    min-height: 100vh;
                }

                .hero-badge, .section-badge {
                    display: inline-block;
                    padding: 0.4rem 1rem;
                    border: 1px solid rgba(30, 144, 255, 0.4);
                    border-radius: 999px;
                    font-size: 0.8rem;
                    letter-spacing: 0.15em;
                    color: #1e90ff;
                }

                .hero-title {
                    font-size: 4rem;
                    line-height: 1.05;
                    margin: 1.5rem 0;
                }

                .hero-subtitle {
                    font-size: 1.2rem;
                    color: #b8c1d9;
                    line-height: 1.6;
                }

                .hero-buttons {
                    display: flex;
                    gap: 1rem;
                    margin: 2rem 0;
                }

                .button {
                    padding: 0.9rem 1.8rem;
                    border-radius: 12px;
                    font-weight: 600;
                    text-decoration: none;
                }

                .button.primary {
                    background: linear-gradient(135deg, #1e90ff, #7b2ff7);
                    color: #fff;
                }

                .button.secondary {
                    border: 1px solid rgba(255, 255, 255, 0.2);
                    color: #fff;
                }

                .hero-stats, .impact-grid {
                    display: flex;
                    gap: 3rem;
                }

                .stat-value, .impact-value {
                    font-size: 2.2rem;
                    font-weight: 800;
                }

                .stat-label, .impact-label {
                    font-size: 0.8rem;
                    color: #8a93ab;
                    letter-spacing: 0.1em;
                }

                .tabular-nums {
                    font-variant-numeric: tabular-nums;
                }

                .hero-phone img, .download-phones img {
                    width: 100%;
                    max-width: 320px;
                    border-radius: 32px;
                    box-shadow: 0 30px 80px rgba(30, 144, 255, 0.25);
                }

                .section-title {
                    font-size: 2.6rem;
                    margin: 1rem 0 2.5rem;
                }

                .card-grid, .testimonial-grid {
                    display: grid;
                    grid-template-columns: repeat(3, 1fr);
                    gap: 2rem;
                }

                .ultra-premium-card, .executive-testimonial, .ultra-premium-cta {
                    position: relative;
                    padding: 2rem;
                    border-radius: 20px;
                    background: rgba(255, 255, 255, 0.03);
                    border: 1px solid rgba(255, 255, 255, 0.08);
                    overflow: hidden;
                }

                .card-glow {
                    position: absolute;
                    top: -40px;
                    right: -40px;
                    width: 120px;
                    height: 120px;
                    border-radius: 50%;
                    background: radial-gradient(circle, rgba(30, 144, 255, 0.3), transparent 70%);
                }

                .ultra-premium-card ul, .download-features {
                    padding-left: 1.2rem;
                    color: #b8c1d9;
                }

                .download {
                    display: grid;
                    grid-template-columns: 1fr 1fr;
                    gap: 4rem;
                    align-items: center;
                }

                .download-phones {
                    position: relative;
                    display: flex;
                    gap: 1.5rem;
                }

                .download-badges {
                    display: flex;
                    gap: 1rem;
                    margin: 1.5rem 0;
                }

                .download-badge {
                    padding: 0.7rem 1.4rem;
                    border-radius: 10px;
                    background: #fff;
                    color: #05070d;
                    text-decoration: none;
                    font-weight: 600;
                }

                .download-badge.muted {
                    background: rgba(255, 255, 255, 0.1);
                    color: #8a93ab;
                }

                .download-note {
                    color: #8a93ab;
                    font-size: 0.85rem;
                }

                .quote {
                    font-size: 1.05rem;
                    line-height: 1.6;
                }

                .author {
                    display: flex;
                    flex-direction: column;
                    margin-top: 1.5rem;
                    color: #8a93ab;
                }

                .impact-grid {
                    justify-content: space-between;
                }

                .ultra-premium-cta {
                    text-align: center;
                    padding: 4rem 2rem;
                }

                .site-footer {
                    position: relative;
                    z-index: 1;
                    border-top: 1px solid rgba(255, 255, 255, 0.06);
                }

                .footer-nav {
                    display: flex;
                    gap: 1.5rem;
                }

                .footer-contact {
                    color: #1e90ff;
                    text-decoration: none;
                }

                .copyright {
                    text-align: center;
                    color: #5c647a;
                    padding-bottom: 2rem;
                }

                @media (max-width: 768px) {
                    .menu-toggle {
                        display: flex;
                    }

                    .header-nav {
                        display: none;
                        position: absolute;
                        top: 100%;
                        left: 0;
                        right: 0;
                        flex-direction: column;
                        padding: 1.5rem 2rem;
                        background: #05070d;
                    }

                    .header-nav.open {
                        display: flex;
                    }

                    .hero, .download {
                        grid-template-columns: 1fr;
                    }

                    .hero-title {
                        font-size: 2.6rem;
                    }

                    .hero-stats, .impact-grid {
                        flex-wrap: wrap;
                        gap: 1.5rem;
                    }

                    .card-grid, .testimonial-grid {
                        grid-template-columns: 1fr;
                    }

                    .footer-content {
                        flex-direction: column;
                        gap: 1rem;
                    }
                }
                "#}
            </style>
        </div>
    }
}
