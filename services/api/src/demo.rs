use crate::infra::DryRunGateway;
use clap::Args;
use lead_form::config::AppConfig;
use lead_form::error::AppError;
use lead_form::form::{ConsentField, ContactForm, Locale, SelectField, SelectionError, TextField};
use lead_form::submission::{
    Clock, HttpLeadGateway, LeadGateway, SubmissionContext, SubmissionController, SubmitRejected,
    SystemClock,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Post the final lead to the configured CRM endpoint instead of a dry run.
    #[arg(long)]
    pub(crate) live: bool,
    /// Form locale (tr or en). Defaults to the configured locale.
    #[arg(long)]
    pub(crate) locale: Option<String>,
    /// Page URL the lead is attributed to; UTM parameters are read from it.
    #[arg(long, default_value = "https://citysresidences.com/?utm_source=demo&utm_medium=cli")]
    pub(crate) page_url: String,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    run_session(args, &config).await
}

async fn run_session(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        live,
        locale,
        page_url,
    } = args;

    let locale = Locale::parse_or(locale.as_deref(), config.form.default_locale);
    let dry_run = DryRunGateway::default();
    let gateway: Arc<dyn LeadGateway> = if live {
        Arc::new(HttpLeadGateway::new(&config.lead)?)
    } else {
        Arc::new(dry_run.clone())
    };

    println!("Contact form demo (locale {})", locale.as_str());
    let mut form = ContactForm::new(locale);

    println!("\nConsent reconciliation");
    form.set_consent(ConsentField::ElectronicMessage, true);
    print_consents("check electronic messages", &form);
    form.set_consent(ConsentField::Sms, false);
    form.set_consent(ConsentField::Email, false);
    print_consents("uncheck SMS and e-mail", &form);
    form.set_consent(ConsentField::Phone, false);
    print_consents("uncheck phone", &form);

    println!("\nMulti-select accumulation");
    toggle_and_print(&mut form, SelectField::ResidenceType, "3+1", true);
    toggle_and_print(&mut form, SelectField::ResidenceType, "1+1", true);
    toggle_and_print(&mut form, SelectField::ResidenceType, "3+1", false);
    toggle_and_print(&mut form, SelectField::HowDidYouHearAboutUs, "google", true);
    toggle_and_print(&mut form, SelectField::HowDidYouHearAboutUs, "penthouse", true);
    for indicator in form.selection(SelectField::ResidenceType).indicators() {
        let mark = if indicator.checked { "x" } else { " " };
        println!("  [{mark}] {}", indicator.label);
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut controller = SubmissionController::with_message_ttl(
        clock.clone(),
        locale.translations(),
        config.form.message_ttl(),
    );
    let context = SubmissionContext::new(locale, page_url);

    println!("\nSubmitting an incomplete form");
    form.set_text(TextField::Name, "Ayşe");
    form.set_text(TextField::Phone, "123");
    match controller.submit(&mut form, &context, gateway.as_ref()).await {
        Err(SubmitRejected::Invalid(errors)) => {
            for field in errors.fields() {
                println!(
                    "  - {}: {}",
                    field.key(),
                    errors.get(field).unwrap_or_default()
                );
            }
        }
        Err(SubmitRejected::InFlight) => println!("  Submission already in flight"),
        Ok(result) => println!("  Unexpectedly submitted: {}", result.text),
    }
    println!("  Controller state: {}", controller.state().label());

    println!("\nSubmitting the completed form");
    form.set_text(TextField::Surname, "Yılmaz");
    form.set_text(TextField::Phone, "555 123 45 67");
    form.set_text(TextField::Email, "ayse@example.com");
    form.set_text(TextField::Message, "Bilgi almak istiyorum.");
    form.set_consent(ConsentField::Consent, true);
    form.set_consent(ConsentField::Sms, true);

    let result = match controller.submit(&mut form, &context, gateway.as_ref()).await {
        Ok(result) => result,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "  {} -> {:?}: {}",
        controller.state().label(),
        result.kind,
        result.text
    );
    println!(
        "  Form after submit: name='{}' residenceType='{}'",
        form.state().name,
        form.state().residence_type
    );

    for payload in dry_run.delivered() {
        println!("  Dry-run payload:");
        for (key, value) in payload.fields() {
            println!("    {key}={value}");
        }
    }

    if let Ok(remaining) = (result.expires_at - clock.now()).to_std() {
        println!("  Message visible for {:.1}s", remaining.as_secs_f32());
        tokio::time::sleep(remaining).await;
    }
    controller.tick();
    println!(
        "  Message after expiry: {}",
        if controller.message().is_some() {
            "visible"
        } else {
            "cleared"
        }
    );
    println!("  Controller state: {}", controller.state().label());
    println!("  Submit label: {}", controller.submit_label());

    Ok(())
}

fn print_consents(step: &str, form: &ContactForm) {
    let consents = form.state().consents();
    println!(
        "- {step}: consent={} electronic={} sms={} email={} phone={}",
        consents.consent, consents.electronic_message, consents.sms, consents.email, consents.phone
    );
}

fn toggle_and_print(form: &mut ContactForm, field: SelectField, option_id: &str, checked: bool) {
    let verb = if checked { "check" } else { "uncheck" };
    match form.toggle(field, option_id, checked) {
        Ok(()) => {
            let value = match field {
                SelectField::ResidenceType => &form.state().residence_type,
                SelectField::HowDidYouHearAboutUs => &form.state().how_did_you_hear_about_us,
            };
            println!("- {verb} {option_id}: {}='{value}'", field.key());
        }
        Err(SelectionError::UnknownOption { field, option_id }) => {
            println!("- {verb} {option_id}: ignored, not an option for {field}");
        }
    }
}
