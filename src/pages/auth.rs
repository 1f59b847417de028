use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::BrowserClient;
use crate::components::icons::{icon_alert, icon_check, icon_wallet};
use crate::components::inputs::{field_class, field_error, on_input};
use crate::forms::{FormErrors, LoginForm, RegisterForm};

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub client: BrowserClient,
    pub on_authenticated: Callback<()>,
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let is_login = use_state(|| true);
    let login = use_state(LoginForm::default);
    let register = use_state(RegisterForm::default);
    let errors = use_state(FormErrors::default);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let is_login = is_login.clone();
        let login = login.clone();
        let register = register.clone();
        let errors = errors.clone();
        let error = error.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let client = props.client.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            error.set(None);
            notice.set(None);

            if *is_login {
                let credentials = match login.validate() {
                    Ok(credentials) => credentials,
                    Err(found) => return errors.set(found),
                };
                errors.set(FormErrors::default());
                loading.set(true);

                let client = client.clone();
                let error = error.clone();
                let loading = loading.clone();
                let on_authenticated = on_authenticated.clone();
                spawn_local(async move {
                    match client.login(&credentials).await {
                        Ok(_) => {
                            loading.set(false);
                            on_authenticated.emit(());
                        }
                        Err(err) => {
                            loading.set(false);
                            error.set(Some(err.message_or("Login failed. Please try again.")));
                        }
                    }
                });
            } else {
                let registration = match register.validate() {
                    Ok(registration) => registration,
                    Err(found) => return errors.set(found),
                };
                errors.set(FormErrors::default());
                loading.set(true);

                let client = client.clone();
                let is_login = is_login.clone();
                let login = login.clone();
                let register = register.clone();
                let error = error.clone();
                let notice = notice.clone();
                let loading = loading.clone();
                spawn_local(async move {
                    match client.register(&registration).await {
                        Ok(user) => {
                            login.set(LoginForm {
                                user_name: user.user_name,
                                password: String::new(),
                            });
                            register.set(RegisterForm::default());
                            notice.set(Some(
                                "Registration successful! Please sign in.".to_string(),
                            ));
                            is_login.set(true);
                        }
                        Err(err) => {
                            error.set(Some(err.message_or("Registration failed.")));
                        }
                    }
                    loading.set(false);
                });
            }
        })
    };

    let toggle_mode = {
        let is_login = is_login.clone();
        let errors = errors.clone();
        let error = error.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            errors.set(FormErrors::default());
            error.set(None);
            notice.set(None);
            is_login.set(!*is_login);
        })
    };

    let fields = if *is_login {
        html! {
            <>
                <div class="form-group">
                    <label>{"Username"}</label>
                    <input
                        type="text"
                        placeholder="Enter your username"
                        class={field_class(&errors, "userName")}
                        value={login.user_name.clone()}
                        oninput={on_input(&login, |f: &mut LoginForm, v: String| f.user_name = v)}
                    />
                    { field_error(&errors, "userName") }
                </div>
                <div class="form-group">
                    <label>{"Password"}</label>
                    <input
                        type="password"
                        placeholder="Enter your password"
                        class={field_class(&errors, "password")}
                        value={login.password.clone()}
                        oninput={on_input(&login, |f: &mut LoginForm, v: String| f.password = v)}
                    />
                    { field_error(&errors, "password") }
                </div>
            </>
        }
    } else {
        html! {
            <>
                <div class="form-group">
                    <label>{"Username"}</label>
                    <input
                        type="text"
                        placeholder="Choose a username"
                        class={field_class(&errors, "userName")}
                        value={register.user_name.clone()}
                        oninput={on_input(&register, |f: &mut RegisterForm, v: String| f.user_name = v)}
                    />
                    { field_error(&errors, "userName") }
                </div>
                <div class="form-group">
                    <label>{"Email"}</label>
                    <input
                        type="email"
                        placeholder="you@example.com"
                        class={field_class(&errors, "email")}
                        value={register.email.clone()}
                        oninput={on_input(&register, |f: &mut RegisterForm, v: String| f.email = v)}
                    />
                    { field_error(&errors, "email") }
                </div>
                <div class="form-group">
                    <label>{"Password"}</label>
                    <input
                        type="password"
                        placeholder="At least 6 characters"
                        class={field_class(&errors, "password")}
                        value={register.password.clone()}
                        oninput={on_input(&register, |f: &mut RegisterForm, v: String| f.password = v)}
                    />
                    { field_error(&errors, "password") }
                </div>
            </>
        }
    };

    html! {
        <div class="auth-container">
            <div class="auth-card">
                <div class="auth-header">
                    <h1 class="logo">{ icon_wallet() }{" Extraa"}</h1>
                    <h2>{ if *is_login { "Welcome Back" } else { "Create Account" } }</h2>
                    <p>
                        { if *is_login { "Sign in to track your expenses" } else { "Start managing your budget today" } }
                    </p>
                </div>

                if let Some(message) = &*notice {
                    <div class="success-message">{ icon_check() }<span>{ message.clone() }</span></div>
                }
                if let Some(message) = &*error {
                    <div class="error-banner">{ icon_alert() }<span>{ message.clone() }</span></div>
                }

                <form class="auth-form" onsubmit={on_submit}>
                    { fields }
                    <button type="submit" class="btn-primary auth-submit" disabled={*loading}>
                        { if *loading { "Please wait..." } else if *is_login { "Sign In" } else { "Sign Up" } }
                    </button>
                </form>

                <div class="auth-footer">
                    { if *is_login { "Don't have an account?" } else { "Already have an account?" } }
                    <button class="link-btn" onclick={toggle_mode}>
                        { if *is_login { "Sign Up" } else { "Sign In" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
